use std::fmt;

use serde::Serialize;

use crate::constants::MS_TO_KMH;
use crate::control::configuration::RocketConfiguration;
use crate::control::propulsion::PropulsionProfile;
use crate::control::schedule::{FlightPhase, PhaseSchedule};
use crate::trajectory_system::kinematics::PositionKinematics;
use crate::trajectory_system::time_axis::TimeAxis;
use crate::trajectory_system::trajectory::Trajectory;

/// One row of the flight table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSample {
    pub time: f64,              // s
    pub air_volume: f64,        // m³
    pub air_pressure: f64,      // Pa (gauge)
    pub ejection_velocity: f64, // m/s
    pub thrust: f64,            // N
    pub rocket_mass: f64,       // kg
    pub tilt: f64,              // degrees
    pub speed: f64,             // m/s
    pub drag: f64,              // N
    pub x: f64,                 // m
    pub y: f64,                 // m
    pub acceleration: f64,      // m/s²
}

/// Largest value of a column and where the rocket was at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub value: f64,
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub max_speed: Extremum,
    pub max_speed_kmh: f64,
    pub max_thrust: Extremum,
    pub max_drag: Extremum,
    pub max_acceleration: Extremum,
    pub apogee: Extremum,
    pub max_extent: f64,
    pub water_ejection_duration: f64,
    pub air_ejection_duration: f64,
    pub flight_duration: f64,
    pub ramp_exit_speed: f64,
    pub ramp_exit_acceleration_g: f64,
    pub phase_transitions: Vec<(FlightPhase, f64)>,
}

/// The finished flight table, cut at ground impact, with its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightDataset {
    samples: Vec<FlightSample>,
    schedule: PhaseSchedule,
    untrimmed_len: usize,
    summary: FlightSummary,
}

impl FlightDataset {
    pub fn assemble(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        profile: &PropulsionProfile,
        time: &TimeAxis,
        trajectory: &Trajectory,
        kinematics: &PositionKinematics,
    ) -> Self {
        let untrimmed_len = schedule.len();
        let mut samples: Vec<FlightSample> = (0..untrimmed_len)
            .map(|index| FlightSample {
                time: time.time[index],
                air_volume: profile.air_volume[index],
                air_pressure: profile.air_pressure[index],
                ejection_velocity: profile.ejection_velocity[index],
                thrust: profile.thrust[index],
                rocket_mass: profile.rocket_mass[index],
                tilt: trajectory.tilt[index],
                speed: trajectory.speed[index],
                drag: trajectory.drag[index],
                x: kinematics.x(index),
                y: kinematics.y(index),
                acceleration: kinematics.acceleration[index],
            })
            .collect();

        if let Some(impact) = samples.iter().position(|sample| sample.y < 0.0) {
            samples.truncate(impact);
        }

        let summary = Self::summarize(config, schedule, time, &samples);

        FlightDataset {
            samples,
            schedule: *schedule,
            untrimmed_len,
            summary,
        }
    }

    fn summarize(
        config: &RocketConfiguration,
        schedule: &PhaseSchedule,
        time: &TimeAxis,
        samples: &[FlightSample],
    ) -> FlightSummary {
        let water_end = time.time[schedule.air_boundary() - 1];
        let air_end = time.time[schedule.ballistic_boundary() - 1];
        let max_speed = extremum(samples, |sample| sample.speed);
        let ramp_exit = config.ramp_exit();

        FlightSummary {
            max_speed,
            max_speed_kmh: max_speed.value * MS_TO_KMH,
            max_thrust: extremum(samples, |sample| sample.thrust),
            max_drag: extremum(samples, |sample| sample.drag),
            max_acceleration: extremum(samples, |sample| sample.acceleration),
            apogee: extremum(samples, |sample| sample.y),
            max_extent: extremum(samples, |sample| sample.x).value,
            water_ejection_duration: water_end,
            air_ejection_duration: air_end - water_end,
            flight_duration: samples.last().map_or(0.0, |sample| sample.time),
            ramp_exit_speed: ramp_exit.speed,
            ramp_exit_acceleration_g: ramp_exit.acceleration_in_g(config.gravity()),
            phase_transitions: vec![
                (FlightPhase::WaterEjection, time.time[0]),
                (FlightPhase::AirEjection, time.time[schedule.air_boundary()]),
                (FlightPhase::Ballistic, time.time[schedule.ballistic_boundary()]),
            ],
        }
    }

    pub fn samples(&self) -> &[FlightSample] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> Option<&FlightSample> {
        self.samples.get(index)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample count before the ground mask was applied.
    pub fn untrimmed_len(&self) -> usize {
        self.untrimmed_len
    }

    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    pub fn summary(&self) -> &FlightSummary {
        &self.summary
    }

    pub fn water_phase(&self) -> &[FlightSample] {
        self.slice(self.schedule.water_range().start, self.schedule.water_range().end)
    }

    pub fn air_phase(&self) -> &[FlightSample] {
        self.slice(self.schedule.air_range().start, self.schedule.air_range().end)
    }

    pub fn residual_phase(&self) -> &[FlightSample] {
        self.slice(self.schedule.residual_range().start, self.schedule.residual_range().end)
    }

    pub fn column<F>(&self, field: F) -> Vec<f64>
    where
        F: Fn(&FlightSample) -> f64,
    {
        self.samples.iter().map(field).collect()
    }

    fn slice(&self, start: usize, end: usize) -> &[FlightSample] {
        let end = end.min(self.samples.len());
        let start = start.min(end);
        &self.samples[start..end]
    }
}

fn extremum<F>(samples: &[FlightSample], field: F) -> Extremum
where
    F: Fn(&FlightSample) -> f64,
{
    let mut best = Extremum {
        value: f64::NEG_INFINITY,
        index: 0,
        x: 0.0,
        y: 0.0,
    };
    for (index, sample) in samples.iter().enumerate() {
        let value = field(sample);
        if value > best.value {
            best = Extremum {
                value,
                index,
                x: sample.x,
                y: sample.y,
            };
        }
    }
    best
}

fn format_time(elapsed_time: f64) -> String {
    if elapsed_time >= 60.0 {
        let minutes = (elapsed_time / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}m {:.2}s", minutes, seconds)
    } else {
        format!("{:.2}s", elapsed_time)
    }
}

fn format_altitude(altitude: f64) -> String {
    if altitude >= 1000.0 {
        format!("{:.2} km", altitude / 1000.0)
    } else {
        format!("{:.2} m", altitude)
    }
}

fn format_extremum(extremum: &Extremum, precision: usize) -> String {
    format!(
        "{:.precision$} at x = {:.2} m, y = {:.2} m",
        extremum.value,
        extremum.x,
        extremum.y,
        precision = precision
    )
}

impl fmt::Display for FlightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Flight Summary ---")?;
        writeln!(
            f,
            "Ramp Exit: {:.2} m/s ({:.2} g)",
            self.ramp_exit_speed, self.ramp_exit_acceleration_g
        )?;
        writeln!(
            f,
            "Max Speed: {} ({:.2} km/h)",
            format_extremum(&self.max_speed, 2),
            self.max_speed_kmh
        )?;
        writeln!(f, "Max Thrust: {}", format_extremum(&self.max_thrust, 2))?;
        writeln!(f, "Max Drag: {}", format_extremum(&self.max_drag, 4))?;
        writeln!(
            f,
            "Max Acceleration: {}",
            format_extremum(&self.max_acceleration, 2)
        )?;
        writeln!(
            f,
            "Apogee: {} at x = {:.2} m",
            format_altitude(self.apogee.value),
            self.apogee.x
        )?;
        writeln!(f, "Max Extent: {}", format_altitude(self.max_extent))?;
        writeln!(
            f,
            "Water Ejection: {}",
            format_time(self.water_ejection_duration)
        )?;
        writeln!(f, "Air Ejection: {}", format_time(self.air_ejection_duration))?;
        writeln!(f, "Flight Time: {}", format_time(self.flight_duration))?;

        writeln!(f, "\n--- Phase Transitions ---")?;
        for (phase, time) in &self.phase_transitions {
            writeln!(f, "Phase {} reached at: {}", phase, format_time(*time))?;
        }
        Ok(())
    }
}
