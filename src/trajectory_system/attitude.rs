use std::f64::consts::PI;
use std::fmt;

/// Flight-path tilt after gravity has acted for `delta_time`, in degrees.
///
/// Gravity's component normal to the flight path, `g * cos(tilt)`, rotates
/// the velocity vector by `atan(g * cos(tilt) * dt / v)`.
pub fn gravity_turn(tilt: f64, gravity: f64, delta_time: f64, speed: f64) -> f64 {
    let rotation = (gravity * (tilt * PI / 180.0).cos() * delta_time / speed).atan();
    tilt - rotation * 180.0 / PI
}

/// Decides the tilt of a ballistic sample.
///
/// Implement this to plug a different nose-over model into the trajectory
/// integrator.
pub trait NoseOverRule: fmt::Debug + Send + Sync {
    /// `candidate` is the gravity-turn tilt for the new sample;
    /// `earlier_speed` and `latest_speed` are the speeds of the two samples
    /// before it.
    fn ballistic_tilt(&self, candidate: f64, earlier_speed: f64, latest_speed: f64) -> f64;

    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Heuristic nose-over past apogee.
///
/// When speed grew over the last two samples the rocket is taken to be falling,
/// and the tilt is forced below the horizon. This is a modeling shortcut that
/// keeps the tilt from oscillating around apogee; it is not derived from the
/// equations of motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedTrendNoseOver;

impl NoseOverRule for SpeedTrendNoseOver {
    fn ballistic_tilt(&self, candidate: f64, earlier_speed: f64, latest_speed: f64) -> f64 {
        if earlier_speed < latest_speed {
            -candidate.abs()
        } else {
            candidate
        }
    }

    fn name(&self) -> &str {
        "speed trend nose-over"
    }
}

/// Plain gravity turn with no sign forcing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityTurn;

impl NoseOverRule for GravityTurn {
    fn ballistic_tilt(&self, candidate: f64, _earlier_speed: f64, _latest_speed: f64) -> f64 {
        candidate
    }

    fn name(&self) -> &str {
        "gravity turn"
    }
}
