use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::constants::{AIR_PHASE_SAMPLES, RESIDUAL_PHASE_SAMPLES, WATER_PHASE_SAMPLES};
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightPhase {
    /// Water is pushed out of the nozzle while the ramp still guides the rocket.
    WaterEjection,
    /// The remaining air charge vents through the nozzle.
    AirEjection,
    /// Unpowered flight under gravity and drag.
    Ballistic,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlightPhase::WaterEjection => "water ejection",
            FlightPhase::AirEjection => "air ejection",
            FlightPhase::Ballistic => "ballistic flight",
        };
        f.write_str(name)
    }
}

/// Sample counts of the three flight regimes.
///
/// The regimes occupy contiguous index ranges in this order: water ejection,
/// air ejection, residual ballistic flight. The counts are fixed ahead of the
/// run and do not depend on the physical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSchedule {
    water_samples: usize,
    air_samples: usize,
    residual_samples: usize,
}

impl PhaseSchedule {
    pub fn standard() -> Self {
        PhaseSchedule {
            water_samples: WATER_PHASE_SAMPLES,
            air_samples: AIR_PHASE_SAMPLES,
            residual_samples: RESIDUAL_PHASE_SAMPLES,
        }
    }

    /// Builds a custom schedule.
    ///
    /// The water and air phases need at least two samples each so that their
    /// interpolation has a start and an end; the residual phase needs the two
    /// bridging samples plus at least one fixed-step sample.
    pub fn new(
        water_samples: usize,
        air_samples: usize,
        residual_samples: usize,
    ) -> Result<Self, SimulationError> {
        if water_samples < 2 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "water phase needs at least 2 samples, got {}",
                water_samples
            )));
        }
        if air_samples < 2 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "air phase needs at least 2 samples, got {}",
                air_samples
            )));
        }
        if residual_samples < 3 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "residual phase needs at least 3 samples, got {}",
                residual_samples
            )));
        }

        Ok(PhaseSchedule {
            water_samples,
            air_samples,
            residual_samples,
        })
    }

    pub fn water_samples(&self) -> usize {
        self.water_samples
    }

    pub fn air_samples(&self) -> usize {
        self.air_samples
    }

    pub fn residual_samples(&self) -> usize {
        self.residual_samples
    }

    pub fn len(&self) -> usize {
        self.water_samples + self.air_samples + self.residual_samples
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of samples with a live propulsion transient.
    pub fn propulsion_len(&self) -> usize {
        self.water_samples + self.air_samples
    }

    /// First air-ejection index (30 for the standard schedule).
    pub fn air_boundary(&self) -> usize {
        self.water_samples
    }

    /// First ballistic index (50 for the standard schedule).
    pub fn ballistic_boundary(&self) -> usize {
        self.propulsion_len()
    }

    pub fn water_range(&self) -> Range<usize> {
        0..self.air_boundary()
    }

    pub fn air_range(&self) -> Range<usize> {
        self.air_boundary()..self.ballistic_boundary()
    }

    pub fn residual_range(&self) -> Range<usize> {
        self.ballistic_boundary()..self.len()
    }

    pub fn phase_of(&self, index: usize) -> FlightPhase {
        if index < self.air_boundary() {
            FlightPhase::WaterEjection
        } else if index < self.ballistic_boundary() {
            FlightPhase::AirEjection
        } else {
            FlightPhase::Ballistic
        }
    }

    pub fn is_boundary(&self, index: usize) -> bool {
        index == self.air_boundary() || index == self.ballistic_boundary()
    }
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        PhaseSchedule::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_boundaries() {
        let schedule = PhaseSchedule::standard();
        assert_eq!(schedule.len(), 599);
        assert_eq!(schedule.propulsion_len(), 50);
        assert_eq!(schedule.water_range(), 0..30);
        assert_eq!(schedule.air_range(), 30..50);
        assert_eq!(schedule.residual_range(), 50..599);
    }

    #[test]
    fn test_phase_of_index() {
        let schedule = PhaseSchedule::standard();
        assert_eq!(schedule.phase_of(0), FlightPhase::WaterEjection);
        assert_eq!(schedule.phase_of(29), FlightPhase::WaterEjection);
        assert_eq!(schedule.phase_of(30), FlightPhase::AirEjection);
        assert_eq!(schedule.phase_of(49), FlightPhase::AirEjection);
        assert_eq!(schedule.phase_of(50), FlightPhase::Ballistic);
        assert_eq!(schedule.phase_of(598), FlightPhase::Ballistic);
    }

    #[test]
    fn test_boundaries_detected() {
        let schedule = PhaseSchedule::standard();
        assert!(schedule.is_boundary(30));
        assert!(schedule.is_boundary(50));
        assert!(!schedule.is_boundary(29));
        assert!(!schedule.is_boundary(51));
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = PhaseSchedule::new(10, 5, 40).unwrap();
        assert_eq!(schedule.len(), 55);
        assert_eq!(schedule.air_range(), 10..15);
        assert_eq!(schedule.phase_of(15), FlightPhase::Ballistic);
    }

    #[test]
    fn test_degenerate_schedule_rejected() {
        assert!(matches!(
            PhaseSchedule::new(1, 20, 549),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PhaseSchedule::new(30, 1, 549),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PhaseSchedule::new(30, 20, 2),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }
}
