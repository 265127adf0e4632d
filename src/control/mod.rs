pub mod configuration;
pub mod propulsion;
pub mod rocket;
pub mod schedule;
