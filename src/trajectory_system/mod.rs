pub mod aerodynamics;
pub mod attitude;
pub mod kinematics;
pub mod time_axis;
pub mod trajectory;
