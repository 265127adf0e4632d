use std::f64::consts::PI;

use crate::control::schedule::PhaseSchedule;
use crate::errors::SimulationError;
use crate::trajectory_system::time_axis::TimeAxis;
use crate::trajectory_system::trajectory::Trajectory;
use crate::utils::vector2d::Vector2D;

/// Planar position and acceleration history, launch point at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionKinematics {
    pub position: Vec<Vector2D>, // m
    pub acceleration: Vec<f64>,  // m/s²
}

impl PositionKinematics {
    pub fn compute(
        schedule: &PhaseSchedule,
        time: &TimeAxis,
        trajectory: &Trajectory,
    ) -> Result<Self, SimulationError> {
        let samples = schedule.len();
        let mut position = Vec::with_capacity(samples);
        let mut acceleration = Vec::with_capacity(samples);
        position.push(Vector2D::zero());
        acceleration.push(0.0);

        for index in 1..samples {
            let delta_time = time.step(index);
            let heading = trajectory.tilt[index] * PI / 180.0;
            let displacement = Vector2D::from_polar(trajectory.speed[index] * delta_time, heading);
            position.push(position[index - 1] + displacement);

            // The zero time step at a phase boundary would blow up the finite difference.
            if schedule.is_boundary(index) {
                acceleration.push(acceleration[index - 1]);
                continue;
            }
            if delta_time.is_nan() || delta_time <= 0.0 {
                return Err(SimulationError::domain(
                    schedule.phase_of(index),
                    index,
                    format!("time step {} s is not positive", delta_time),
                ));
            }
            acceleration
                .push((trajectory.speed[index] - trajectory.speed[index - 1]) / delta_time);
        }

        Ok(PositionKinematics {
            position,
            acceleration,
        })
    }

    pub fn x(&self, index: usize) -> f64 {
        self.position[index].x
    }

    pub fn y(&self, index: usize) -> f64 {
        self.position[index].y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::configuration::{LaunchParameters, RocketConfiguration};
    use crate::control::propulsion::PropulsionProfile;
    use crate::trajectory_system::attitude::SpeedTrendNoseOver;
    use crate::trajectory_system::trajectory::TrajectoryIntegrator;
    use approx::assert_relative_eq;

    fn default_run() -> (TimeAxis, Trajectory, PositionKinematics) {
        let config = RocketConfiguration::new(LaunchParameters::default()).unwrap();
        let schedule = PhaseSchedule::standard();
        let profile = PropulsionProfile::compute(&config, &schedule).unwrap();
        let time = TimeAxis::compute(&config, &schedule, &profile).unwrap();
        let trajectory = TrajectoryIntegrator::new(&config, &schedule, &SpeedTrendNoseOver)
            .integrate(&profile, &time)
            .unwrap();
        let kinematics = PositionKinematics::compute(&schedule, &time, &trajectory).unwrap();
        (time, trajectory, kinematics)
    }

    #[test]
    fn test_starts_at_origin() {
        let (_, _, kinematics) = default_run();
        assert_eq!(kinematics.position[0], Vector2D::zero());
        assert_eq!(kinematics.acceleration[0], 0.0);
        assert_eq!(kinematics.position.len(), 599);
        assert_eq!(kinematics.acceleration.len(), 599);
    }

    #[test]
    fn test_acceleration_duplicated_at_boundaries() {
        let (_, _, kinematics) = default_run();
        assert_eq!(kinematics.acceleration[30], kinematics.acceleration[29]);
        assert_eq!(kinematics.acceleration[50], kinematics.acceleration[49]);
        assert!(kinematics.acceleration.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_interior_acceleration_is_finite_difference() {
        let (time, trajectory, kinematics) = default_run();
        for index in [1, 15, 31, 45, 51, 120] {
            let expected = (trajectory.speed[index] - trajectory.speed[index - 1]) / time.step(index);
            assert_relative_eq!(kinematics.acceleration[index], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_position_steps_along_tilt() {
        let (time, trajectory, kinematics) = default_run();
        let index = 10;
        let step = trajectory.speed[index] * time.step(index);
        let heading = trajectory.tilt[index] * PI / 180.0;
        assert_relative_eq!(
            kinematics.x(index) - kinematics.x(index - 1),
            step * heading.cos(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            kinematics.y(index) - kinematics.y(index - 1),
            step * heading.sin(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_boundary_samples_do_not_move() {
        let (_, _, kinematics) = default_run();
        assert_eq!(kinematics.position[30], kinematics.position[29]);
        assert_eq!(kinematics.position[50], kinematics.position[49]);
    }
}
