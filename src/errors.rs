use thiserror::Error;

use crate::control::schedule::FlightPhase;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Numerical domain error during {phase} at sample {index}: {reason}")]
    NumericalDomain {
        phase: FlightPhase,
        index: usize,
        reason: String,
    },

    #[error("Configuration parse error: {0}")]
    ConfigurationParse(#[from] toml::de::Error),
}

impl SimulationError {
    pub(crate) fn domain(phase: FlightPhase, index: usize, reason: impl Into<String>) -> Self {
        SimulationError::NumericalDomain {
            phase,
            index,
            reason: reason.into(),
        }
    }
}
