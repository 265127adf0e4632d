use crate::constants::PRESSURE_EXHAUSTION_TOLERANCE;
use crate::control::configuration::RocketConfiguration;
use crate::control::schedule::{FlightPhase, PhaseSchedule};
use crate::errors::SimulationError;

/// Per-sample state of the propulsion transient.
///
/// Every series spans the whole schedule. Past the air-ejection phase the
/// volume, pressure, ejection velocity and thrust are zero and the mass is the
/// empty rocket mass.
#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionProfile {
    pub air_volume: Vec<f64>,        // m³
    pub air_pressure: Vec<f64>,      // Pa (gauge)
    pub ejection_velocity: Vec<f64>, // m/s
    pub thrust: Vec<f64>,            // N
    pub rocket_mass: Vec<f64>,       // kg
}

impl PropulsionProfile {
    pub fn compute(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
    ) -> Result<Self, SimulationError> {
        let air_volume = Self::calculate_air_volume(config, schedule);
        let air_pressure = Self::calculate_pressure(config, schedule, &air_volume)?;
        let ejection_velocity = Self::calculate_ejection_velocity(config, schedule, &air_pressure)?;
        let thrust = Self::calculate_thrust(config, schedule, &ejection_velocity);
        let rocket_mass = Self::calculate_mass(config, schedule, &air_volume);

        Ok(PropulsionProfile {
            air_volume,
            air_pressure,
            ejection_velocity,
            thrust,
            rocket_mass,
        })
    }

    /// Water phase: the air pocket grows linearly until it fills the bottle.
    /// Air phase: a notional free-expansion volume growing linearly from the
    /// bottle volume to the volume the charge occupies at atmospheric pressure.
    fn calculate_air_volume(config: &RocketConfiguration, schedule: &PhaseSchedule) -> Vec<f64> {
        let mut volumes = vec![0.0; schedule.len()];
        let bottle_volume = config.bottle_volume();
        let initial_volume = config.initial_air_volume();
        let final_volume = config.final_air_volume();

        let water_steps = (schedule.water_samples() - 1) as f64;
        for (step, index) in schedule.water_range().enumerate() {
            volumes[index] =
                initial_volume + (bottle_volume - initial_volume) * step as f64 / water_steps;
        }
        volumes[schedule.air_boundary() - 1] = bottle_volume;

        let air_steps = (schedule.air_samples() - 1) as f64;
        for (step, index) in schedule.air_range().enumerate() {
            volumes[index] = bottle_volume + (final_volume - bottle_volume) * step as f64 / air_steps;
        }
        volumes[schedule.ballistic_boundary() - 1] = final_volume;

        volumes
    }

    fn calculate_pressure(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        air_volume: &[f64],
    ) -> Result<Vec<f64>, SimulationError> {
        let mut pressures = vec![0.0; schedule.len()];
        let atmospheric = config.atmospheric_pressure();

        for index in 0..schedule.propulsion_len() {
            let volume = air_volume[index];
            if volume.is_nan() || volume <= 0.0 {
                return Err(SimulationError::domain(
                    schedule.phase_of(index),
                    index,
                    format!("air volume {} m³ is not positive", volume),
                ));
            }

            let pressure = config.charge_constant() / volume - atmospheric;
            pressures[index] = if pressure.abs() <= PRESSURE_EXHAUSTION_TOLERANCE * atmospheric {
                0.0
            } else {
                pressure
            };
        }

        Ok(pressures)
    }

    fn calculate_ejection_velocity(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        air_pressure: &[f64],
    ) -> Result<Vec<f64>, SimulationError> {
        let mut velocities = vec![0.0; schedule.len()];
        let beta = config.beta();

        for index in 0..schedule.propulsion_len() {
            let phase = schedule.phase_of(index);
            let density = match phase {
                FlightPhase::WaterEjection => beta,
                _ => config.air_density(),
            };

            let radicand = 2.0 * air_pressure[index] / density;
            if radicand.is_nan() || radicand < 0.0 {
                return Err(SimulationError::domain(
                    phase,
                    index,
                    format!("negative ejection velocity radicand {}", radicand),
                ));
            }
            velocities[index] = radicand.sqrt();
        }

        Ok(velocities)
    }

    /// Momentum flux of the ejected fluid through the nozzle.
    fn calculate_thrust(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        ejection_velocity: &[f64],
    ) -> Vec<f64> {
        let mut thrust = vec![0.0; schedule.len()];

        for index in 0..schedule.propulsion_len() {
            let density = match schedule.phase_of(index) {
                FlightPhase::WaterEjection => config.water_density(),
                _ => config.air_density(),
            };
            thrust[index] = density * config.output_section() * ejection_velocity[index].powi(2);
        }

        thrust
    }

    fn calculate_mass(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        air_volume: &[f64],
    ) -> Vec<f64> {
        let mut masses = vec![config.empty_mass(); schedule.len()];

        for index in schedule.water_range() {
            masses[index] = config.empty_mass()
                + config.water_density() * (config.bottle_volume() - air_volume[index]);
        }

        masses
    }

    pub fn len(&self) -> usize {
        self.air_volume.len()
    }

    pub fn is_empty(&self) -> bool {
        self.air_volume.is_empty()
    }

    pub fn get_thrust(&self, index: usize) -> f64 {
        self.thrust.get(index).copied().unwrap_or(0.0)
    }

    pub fn get_mass(&self, index: usize) -> f64 {
        self.rocket_mass[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::configuration::LaunchParameters;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn default_profile() -> (RocketConfiguration, PhaseSchedule, PropulsionProfile) {
        let config = RocketConfiguration::new(LaunchParameters::default()).unwrap();
        let schedule = PhaseSchedule::standard();
        let profile = PropulsionProfile::compute(&config, &schedule).unwrap();
        (config, schedule, profile)
    }

    #[test]
    fn test_series_span_schedule() {
        let (_, schedule, profile) = default_profile();
        assert_eq!(profile.len(), schedule.len());
        assert_eq!(profile.air_pressure.len(), 599);
        assert_eq!(profile.rocket_mass.len(), 599);
    }

    #[test]
    fn test_air_volume_endpoints() {
        let (config, _, profile) = default_profile();
        assert_relative_eq!(profile.air_volume[0], 0.00135, max_relative = 1e-12);
        assert_eq!(profile.air_volume[29], config.bottle_volume());
        assert_eq!(profile.air_volume[30], config.bottle_volume());
        assert_eq!(profile.air_volume[49], config.final_air_volume());
        assert_eq!(profile.air_volume[50], 0.0);
    }

    #[test]
    fn test_water_phase_volume_monotonic_and_bounded() {
        let (config, schedule, profile) = default_profile();
        for index in 1..schedule.air_boundary() {
            assert!(profile.air_volume[index] >= profile.air_volume[index - 1]);
            assert!(profile.air_volume[index] <= config.bottle_volume());
        }
    }

    #[test]
    fn test_air_phase_volume_exceeds_bottle() {
        let (config, schedule, profile) = default_profile();
        for index in schedule.air_boundary() + 1..schedule.ballistic_boundary() {
            assert!(profile.air_volume[index] > profile.air_volume[index - 1]);
        }
        assert!(profile.air_volume[49] > config.bottle_volume());
    }

    #[test]
    fn test_initial_pressure_recovered() {
        let (config, _, profile) = default_profile();
        assert_relative_eq!(profile.air_pressure[0], config.initial_pressure(), max_relative = 1e-9);
    }

    #[test]
    fn test_pressure_exhausted_at_final_air_sample() {
        let (_, _, profile) = default_profile();
        assert_eq!(profile.air_pressure[49], 0.0);
        assert_eq!(profile.ejection_velocity[49], 0.0);
        assert_eq!(profile.thrust[49], 0.0);
        assert!(profile.air_pressure[48] > 0.0);
    }

    #[test]
    fn test_water_phase_thrust_is_momentum_flux() {
        let (config, schedule, profile) = default_profile();
        for index in schedule.water_range() {
            let expected = config.water_density()
                * config.output_section()
                * profile.ejection_velocity[index].powi(2);
            assert_relative_eq!(profile.thrust[index], expected, max_relative = 1e-12);
            assert!(profile.thrust[index] > 0.0);
        }
        assert_relative_eq!(profile.thrust[0], 127.2478088627093, max_relative = 1e-9);
        assert_relative_eq!(profile.ejection_velocity[0], 44.76848890087024, max_relative = 1e-9);
    }

    #[test]
    fn test_air_phase_uses_air_density() {
        let (config, _, profile) = default_profile();
        let expected = config.air_density() * config.output_section() * profile.ejection_velocity[35].powi(2);
        assert_relative_eq!(profile.thrust[35], expected, max_relative = 1e-12);
        assert_relative_eq!(
            profile.ejection_velocity[35],
            (2.0 * profile.air_pressure[35] / config.air_density()).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_no_thrust_after_propulsion() {
        let (_, schedule, profile) = default_profile();
        for index in schedule.residual_range() {
            assert_eq!(profile.thrust[index], 0.0);
            assert_eq!(profile.air_pressure[index], 0.0);
            assert_eq!(profile.ejection_velocity[index], 0.0);
        }
        assert_eq!(profile.get_thrust(10_000), 0.0);
    }

    #[test]
    fn test_mass_drains_to_empty() {
        let (config, _, profile) = default_profile();
        assert_relative_eq!(profile.get_mass(0), config.wet_mass(), max_relative = 1e-12);
        assert_abs_diff_eq!(profile.get_mass(29), config.empty_mass(), epsilon = 1e-12);
        for index in 1..profile.len() {
            assert!(profile.rocket_mass[index] <= profile.rocket_mass[index - 1]);
        }
        assert_eq!(profile.rocket_mass[598], config.empty_mass());
    }

    #[test]
    fn test_custom_schedule_boundaries() {
        let config = RocketConfiguration::new(LaunchParameters::default()).unwrap();
        let schedule = PhaseSchedule::new(10, 8, 30).unwrap();
        let profile = PropulsionProfile::compute(&config, &schedule).unwrap();
        assert_eq!(profile.len(), 48);
        assert_eq!(profile.air_volume[9], config.bottle_volume());
        assert_eq!(profile.air_volume[17], config.final_air_volume());
        assert_eq!(profile.thrust[18], 0.0);
    }
}
