pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::configuration::{LaunchParameters, RampExit, RampLengthConvention, RocketConfiguration};
pub use control::propulsion::PropulsionProfile;
pub use control::rocket::{simulate, WaterRocket};
pub use control::schedule::{FlightPhase, PhaseSchedule};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::attitude::{GravityTurn, NoseOverRule, SpeedTrendNoseOver};
pub use trajectory_system::kinematics::PositionKinematics;
pub use trajectory_system::time_axis::TimeAxis;
pub use trajectory_system::trajectory::{Trajectory, TrajectoryIntegrator};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Extremum, FlightDataset, FlightSample, FlightSummary};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
