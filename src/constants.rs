// Environmental Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const WATER_DENSITY: f64 = 998.0; // kg/m³
pub const AIR_DENSITY: f64 = 1.2; // kg/m³
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa (absolute)

// Default Launch Parameters
pub const DEFAULT_BOTTLE_VOLUME: f64 = 2.0; // L
pub const DEFAULT_BOTTLE_DIAMETER: f64 = 8.9; // cm
pub const DEFAULT_OUTPUT_DIAMETER: f64 = 0.9; // cm
pub const DEFAULT_EMPTY_MASS: f64 = 0.5; // kg
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.1;
pub const DEFAULT_TILT_ANGLE: f64 = 89.0; // degrees from horizontal
pub const DEFAULT_RAMP_LENGTH: f64 = 22.0; // cm
pub const DEFAULT_INITIAL_PRESSURE: f64 = 10.0; // bar (gauge)
pub const DEFAULT_INITIAL_WATER_VOLUME: f64 = 0.65; // L

// Unit Conversions
pub const LITERS_TO_CUBIC_METERS: f64 = 1.0e-3;
pub const CENTIMETERS_TO_METERS: f64 = 1.0e-2;
pub const BAR_TO_PASCALS: f64 = 1.0e5;
pub const MS_TO_KMH: f64 = 3.6;

// Sampling Schedule
pub const WATER_PHASE_SAMPLES: usize = 30;
pub const AIR_PHASE_SAMPLES: usize = 20;
pub const RESIDUAL_PHASE_SAMPLES: usize = 549;
pub const TRANSITION_TIME_STEP: f64 = 0.01; // s
pub const RESIDUAL_TIME_STEP: f64 = 0.05; // s

// Gauge pressure within this fraction of atmospheric pressure is treated as exhausted
pub const PRESSURE_EXHAUSTION_TOLERANCE: f64 = 1.0e-9;
