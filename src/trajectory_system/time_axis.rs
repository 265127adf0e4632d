use crate::constants::{RESIDUAL_TIME_STEP, TRANSITION_TIME_STEP};
use crate::control::configuration::RocketConfiguration;
use crate::control::propulsion::PropulsionProfile;
use crate::control::schedule::{FlightPhase, PhaseSchedule};
use crate::errors::SimulationError;

/// Elapsed time of every sample.
///
/// Propulsion samples get physically derived times; the residual phase is a
/// fixed-rate grid. The first sample of the air phase and of the ballistic
/// phase repeat the previous time, so the axis is non-decreasing with a zero
/// step at exactly those two boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub time: Vec<f64>, // s
}

impl TimeAxis {
    pub fn compute(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        profile: &PropulsionProfile,
    ) -> Result<Self, SimulationError> {
        let mut time = vec![0.0; schedule.len()];
        let volume = &profile.air_volume;

        // Closed-form integral of the water outflow: dV/dt = A_out * sqrt(2 * P0 * V0 / (beta * V)).
        let initial_volume = config.initial_air_volume();
        let outflow_scale = config.output_section()
            * (2.0 * config.initial_pressure() * initial_volume / config.beta()).sqrt();
        if outflow_scale.is_nan() || outflow_scale <= 0.0 {
            return Err(SimulationError::domain(
                FlightPhase::WaterEjection,
                0,
                format!("water outflow scale {} is not positive", outflow_scale),
            ));
        }

        for index in schedule.water_range() {
            time[index] =
                (volume_integral(volume[index]) - volume_integral(initial_volume)) / outflow_scale;
        }

        let air_start = schedule.air_boundary();
        time[air_start] = (volume_integral(volume[air_start])
            - volume_integral(config.bottle_volume()))
            / outflow_scale
            + time[air_start - 1];

        for index in air_start + 1..schedule.ballistic_boundary() {
            let mean_velocity =
                (profile.ejection_velocity[index] + profile.ejection_velocity[index - 1]) / 2.0;
            let flow_area_speed = config.output_section() * mean_velocity;
            if flow_area_speed.is_nan() || flow_area_speed <= 0.0 {
                return Err(SimulationError::domain(
                    FlightPhase::AirEjection,
                    index,
                    format!("mean ejection velocity {} m/s is not positive", mean_velocity),
                ));
            }
            time[index] = time[index - 1] + (volume[index] - volume[index - 1]) / flow_area_speed;
        }

        let ballistic_start = schedule.ballistic_boundary();
        time[ballistic_start] = time[ballistic_start - 1];
        time[ballistic_start + 1] = time[ballistic_start] + TRANSITION_TIME_STEP;
        for index in ballistic_start + 2..schedule.len() {
            time[index] = time[index - 1] + RESIDUAL_TIME_STEP;
        }

        Ok(TimeAxis { time })
    }

    /// Time elapsed between `index - 1` and `index`.
    pub fn step(&self, index: usize) -> f64 {
        self.time[index] - self.time[index - 1]
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

fn volume_integral(volume: f64) -> f64 {
    (2.0 / 3.0) * volume.powf(1.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::configuration::LaunchParameters;
    use approx::assert_relative_eq;

    fn default_time_axis() -> TimeAxis {
        let config = RocketConfiguration::new(LaunchParameters::default()).unwrap();
        let schedule = PhaseSchedule::standard();
        let profile = PropulsionProfile::compute(&config, &schedule).unwrap();
        TimeAxis::compute(&config, &schedule, &profile).unwrap()
    }

    #[test]
    fn test_time_starts_at_zero() {
        let axis = default_time_axis();
        assert_eq!(axis.len(), 599);
        assert_eq!(axis.time[0], 0.0);
    }

    #[test]
    fn test_phase_durations() {
        let axis = default_time_axis();
        assert_relative_eq!(axis.time[29], 0.25381650857884536, max_relative = 1e-9);
        assert_relative_eq!(axis.time[49], 1.1108831769903484, max_relative = 1e-9);
    }

    #[test]
    fn test_boundary_samples_repeat_time() {
        let axis = default_time_axis();
        assert_eq!(axis.time[30], axis.time[29]);
        assert_eq!(axis.time[50], axis.time[49]);
        assert_eq!(axis.step(30), 0.0);
        assert_eq!(axis.step(50), 0.0);
    }

    #[test]
    fn test_residual_grid() {
        let axis = default_time_axis();
        assert_relative_eq!(axis.step(51), 0.01, max_relative = 1e-9);
        for index in 52..axis.len() {
            assert_relative_eq!(axis.step(index), 0.05, max_relative = 1e-9);
        }
        assert_relative_eq!(axis.time[598], 28.47088317699062, max_relative = 1e-9);
    }

    #[test]
    fn test_time_increases_away_from_boundaries() {
        let axis = default_time_axis();
        for index in 1..axis.len() {
            if index == 30 || index == 50 {
                continue;
            }
            assert!(axis.step(index) > 0.0, "time stalls at sample {}", index);
        }
    }
}
