use crate::control::configuration::RocketConfiguration;
use crate::control::propulsion::PropulsionProfile;
use crate::control::schedule::PhaseSchedule;
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::FlightDataset;
use crate::trajectory_system::attitude::{NoseOverRule, SpeedTrendNoseOver};
use crate::trajectory_system::kinematics::PositionKinematics;
use crate::trajectory_system::time_axis::TimeAxis;
use crate::trajectory_system::trajectory::TrajectoryIntegrator;

/// A configured water rocket ready to be flown.
///
/// `launch` runs the pipeline in a fixed order: propulsion profile, time
/// axis, trajectory, position kinematics, dataset. Each stage reads only the
/// finished output of the stages before it, so launching the same rocket
/// twice yields identical datasets.
#[derive(Debug)]
pub struct WaterRocket {
    pub configuration: RocketConfiguration,
    pub schedule: PhaseSchedule,
    nose_over: Box<dyn NoseOverRule>,
}

impl WaterRocket {
    pub fn new(configuration: RocketConfiguration) -> Self {
        WaterRocket {
            configuration,
            schedule: PhaseSchedule::standard(),
            nose_over: Box::new(SpeedTrendNoseOver),
        }
    }

    pub fn with_schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_nose_over<R: NoseOverRule + 'static>(mut self, rule: R) -> Self {
        self.nose_over = Box::new(rule);
        self
    }

    pub fn nose_over(&self) -> &dyn NoseOverRule {
        self.nose_over.as_ref()
    }

    pub fn launch(&self) -> Result<FlightDataset, SimulationError> {
        let config = &self.configuration;
        let schedule = &self.schedule;

        let profile = PropulsionProfile::compute(config, schedule)?;
        let time = TimeAxis::compute(config, schedule, &profile)?;
        let trajectory =
            TrajectoryIntegrator::new(config, schedule, self.nose_over()).integrate(&profile, &time)?;
        let kinematics = PositionKinematics::compute(schedule, &time, &trajectory)?;

        Ok(FlightDataset::assemble(
            config,
            schedule,
            &profile,
            &time,
            &trajectory,
            &kinematics,
        ))
    }
}

/// Flies `configuration` on the standard schedule with the default nose-over rule.
pub fn simulate(configuration: &RocketConfiguration) -> Result<FlightDataset, SimulationError> {
    WaterRocket::new(configuration.clone()).launch()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::configuration::LaunchParameters;
    use crate::trajectory_system::attitude::GravityTurn;

    fn create_test_rocket() -> WaterRocket {
        WaterRocket::new(RocketConfiguration::new(LaunchParameters::default()).unwrap())
    }

    #[test]
    fn test_default_rule_is_speed_trend() {
        let rocket = create_test_rocket();
        assert_eq!(rocket.nose_over().name(), "speed trend nose-over");
        let rocket = rocket.with_nose_over(GravityTurn);
        assert_eq!(rocket.nose_over().name(), "gravity turn");
    }

    #[test]
    fn test_launch_produces_trimmed_dataset() {
        let dataset = create_test_rocket().launch().unwrap();
        assert_eq!(dataset.untrimmed_len(), 599);
        assert_eq!(dataset.len(), 348);
        assert!(dataset.samples().iter().all(|sample| sample.y >= 0.0));
    }

    #[test]
    fn test_custom_schedule_flows_through() {
        let schedule = PhaseSchedule::new(20, 15, 600).unwrap();
        let dataset = create_test_rocket().with_schedule(schedule).launch().unwrap();
        assert_eq!(dataset.untrimmed_len(), 635);
        assert_eq!(dataset.water_phase().len(), 20);
        assert_eq!(dataset.air_phase().len(), 15);
        assert_eq!(dataset.air_phase()[14].thrust, 0.0);
        assert_eq!(dataset.residual_phase()[0].thrust, 0.0);
    }

    #[test]
    fn test_simulate_matches_launch() {
        let config = RocketConfiguration::new(LaunchParameters::default()).unwrap();
        let dataset = simulate(&config).unwrap();
        assert_eq!(dataset, WaterRocket::new(config).launch().unwrap());
    }
}
