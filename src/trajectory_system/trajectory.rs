use std::f64::consts::PI;

use crate::control::configuration::RocketConfiguration;
use crate::control::propulsion::PropulsionProfile;
use crate::control::schedule::{FlightPhase, PhaseSchedule};
use crate::errors::SimulationError;
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::attitude::{gravity_turn, NoseOverRule};
use crate::trajectory_system::time_axis::TimeAxis;

/// Tilt, speed and drag of every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub tilt: Vec<f64>,  // degrees above horizontal
    pub speed: Vec<f64>, // m/s
    pub drag: Vec<f64>,  // N
}

/// Steps the flight path through the three regimes.
///
/// The regime of a sample follows its phase: during water ejection the rocket
/// leaves the ramp with a draining wet mass, during air ejection it flies free
/// on the empty mass with air thrust, and in the ballistic phase only gravity
/// and drag act. The run ends at the schedule horizon.
#[derive(Debug)]
pub struct TrajectoryIntegrator<'a> {
    config: &'a RocketConfiguration,
    schedule: &'a PhaseSchedule,
    aerodynamics: Aerodynamics,
    nose_over: &'a dyn NoseOverRule,
}

impl<'a> TrajectoryIntegrator<'a> {
    pub fn new(
        config: &'a RocketConfiguration,
        schedule: &'a PhaseSchedule,
        nose_over: &'a dyn NoseOverRule,
    ) -> Self {
        TrajectoryIntegrator {
            config,
            schedule,
            aerodynamics: Aerodynamics::from_configuration(config),
            nose_over,
        }
    }

    pub fn integrate(
        &self,
        profile: &PropulsionProfile,
        time: &TimeAxis,
    ) -> Result<Trajectory, SimulationError> {
        let samples = self.schedule.len();
        let mut tilt = Vec::with_capacity(samples);
        let mut speed = Vec::with_capacity(samples);
        let mut drag = Vec::with_capacity(samples);

        let exit_speed = self.config.ramp_exit().speed;
        tilt.push(self.config.tilt_angle());
        speed.push(exit_speed);
        drag.push(self.aerodynamics.calculate_drag(exit_speed));

        for index in 1..samples {
            let phase = self.schedule.phase_of(index);
            let previous_speed = speed[index - 1];
            if !previous_speed.is_finite() || previous_speed <= 0.0 {
                return Err(SimulationError::domain(
                    phase,
                    index,
                    format!("cannot rotate flight path at speed {} m/s", previous_speed),
                ));
            }

            let delta_time = time.step(index);
            let candidate = gravity_turn(
                tilt[index - 1],
                self.config.gravity(),
                delta_time,
                previous_speed,
            );
            let next_tilt = match phase {
                FlightPhase::Ballistic => {
                    self.nose_over
                        .ballistic_tilt(candidate, speed[index - 2], previous_speed)
                }
                _ => candidate,
            };

            let next_speed = self.next_speed(
                phase,
                index,
                profile,
                previous_speed,
                drag[index - 1],
                next_tilt,
                delta_time,
            );

            tilt.push(next_tilt);
            speed.push(next_speed);
            drag.push(self.aerodynamics.calculate_drag(next_speed));
        }

        Ok(Trajectory { tilt, speed, drag })
    }

    #[allow(clippy::too_many_arguments)]
    fn next_speed(
        &self,
        phase: FlightPhase,
        index: usize,
        profile: &PropulsionProfile,
        previous_speed: f64,
        previous_drag: f64,
        tilt: f64,
        delta_time: f64,
    ) -> f64 {
        let gravity_loss = self.config.gravity() * (tilt * PI / 180.0).sin();
        let empty_mass = self.config.empty_mass();

        match phase {
            FlightPhase::WaterEjection => {
                let thrust = profile.get_thrust(index - 1);
                let mass = profile.get_mass(index);
                previous_speed + ((thrust - previous_drag) / mass - gravity_loss) * delta_time
            }
            FlightPhase::AirEjection => {
                let thrust = profile.get_thrust(index);
                (previous_speed + ((thrust - previous_drag) / empty_mass - gravity_loss) * delta_time)
                    .abs()
            }
            FlightPhase::Ballistic => {
                (previous_speed + (-previous_drag / empty_mass - gravity_loss) * delta_time).abs()
            }
        }
    }
}
