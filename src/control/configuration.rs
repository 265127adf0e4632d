use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_DENSITY, BAR_TO_PASCALS, CENTIMETERS_TO_METERS, DEFAULT_BOTTLE_DIAMETER,
    DEFAULT_BOTTLE_VOLUME, DEFAULT_DRAG_COEFFICIENT, DEFAULT_EMPTY_MASS,
    DEFAULT_INITIAL_PRESSURE, DEFAULT_INITIAL_WATER_VOLUME, DEFAULT_OUTPUT_DIAMETER,
    DEFAULT_RAMP_LENGTH, DEFAULT_TILT_ANGLE, GRAVITY, LITERS_TO_CUBIC_METERS, MS_TO_KMH,
    SEA_LEVEL_PRESSURE, WATER_DENSITY,
};
use crate::control::schedule::FlightPhase;
use crate::errors::SimulationError;

/// Which representation of the ramp length enters the ramp exit time
/// `t_exit = sqrt(2 * L / a_x)`.
///
/// `Centimeters` feeds the raw centimeter value, as the published water rocket
/// package does; it yields an exit speed about sqrt(100) = 10 times larger than
/// `Meters`, which is the dimensionally consistent form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampLengthConvention {
    #[default]
    Centimeters,
    Meters,
}

/// Launch parameters in bench units: liters, centimeters and bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    pub bottle_volume_l: f64,
    pub bottle_diameter_cm: f64,
    pub output_diameter_cm: f64,
    pub empty_mass_kg: f64,
    pub drag_coefficient: f64,
    pub tilt_angle_deg: f64,
    pub ramp_length_cm: f64,
    pub initial_pressure_bar: f64,
    pub initial_water_volume_l: f64,
    pub gravity: f64,
    pub water_density: f64,
    pub air_density: f64,
    pub atmospheric_pressure: f64,
    pub ramp_length_convention: RampLengthConvention,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        LaunchParameters {
            bottle_volume_l: DEFAULT_BOTTLE_VOLUME,
            bottle_diameter_cm: DEFAULT_BOTTLE_DIAMETER,
            output_diameter_cm: DEFAULT_OUTPUT_DIAMETER,
            empty_mass_kg: DEFAULT_EMPTY_MASS,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            tilt_angle_deg: DEFAULT_TILT_ANGLE,
            ramp_length_cm: DEFAULT_RAMP_LENGTH,
            initial_pressure_bar: DEFAULT_INITIAL_PRESSURE,
            initial_water_volume_l: DEFAULT_INITIAL_WATER_VOLUME,
            gravity: GRAVITY,
            water_density: WATER_DENSITY,
            air_density: AIR_DENSITY,
            atmospheric_pressure: SEA_LEVEL_PRESSURE,
            ramp_length_convention: RampLengthConvention::default(),
        }
    }
}

impl LaunchParameters {
    /// Parses a TOML document. Fields left out keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(self) -> Result<RocketConfiguration, SimulationError> {
        RocketConfiguration::new(self)
    }
}

/// Kinematics of the rocket leaving the launch ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampExit {
    pub acceleration: f64, // m/s²
    pub time: f64,         // s
    pub speed: f64,        // m/s
}

impl RampExit {
    pub fn acceleration_in_g(&self, gravity: f64) -> f64 {
        self.acceleration / gravity
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed * MS_TO_KMH
    }
}

/// Validated launch configuration, normalized to SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketConfiguration {
    bottle_volume: f64,        // m³
    bottle_section: f64,       // m²
    output_section: f64,       // m²
    empty_mass: f64,           // kg
    drag_coefficient: f64,
    tilt_angle: f64,           // degrees
    ramp_length: f64,          // m
    initial_pressure: f64,     // Pa (gauge)
    initial_water_volume: f64, // m³
    gravity: f64,
    water_density: f64,
    air_density: f64,
    atmospheric_pressure: f64, // Pa (absolute)
    ramp_length_convention: RampLengthConvention,
    ramp_exit: RampExit,
}

impl RocketConfiguration {
    pub fn new(params: LaunchParameters) -> Result<Self, SimulationError> {
        Self::check_inputs(&params)?;

        let bottle_section = disc_area(params.bottle_diameter_cm * CENTIMETERS_TO_METERS);
        let output_section = disc_area(params.output_diameter_cm * CENTIMETERS_TO_METERS);

        let mut configuration = RocketConfiguration {
            bottle_volume: params.bottle_volume_l * LITERS_TO_CUBIC_METERS,
            bottle_section,
            output_section,
            empty_mass: params.empty_mass_kg,
            drag_coefficient: params.drag_coefficient,
            tilt_angle: params.tilt_angle_deg,
            ramp_length: params.ramp_length_cm * CENTIMETERS_TO_METERS,
            initial_pressure: params.initial_pressure_bar * BAR_TO_PASCALS,
            initial_water_volume: params.initial_water_volume_l * LITERS_TO_CUBIC_METERS,
            gravity: params.gravity,
            water_density: params.water_density,
            air_density: params.air_density,
            atmospheric_pressure: params.atmospheric_pressure,
            ramp_length_convention: params.ramp_length_convention,
            ramp_exit: RampExit {
                acceleration: 0.0,
                time: 0.0,
                speed: 0.0,
            },
        };
        configuration.ramp_exit = configuration.calculate_ramp_exit()?;

        Ok(configuration)
    }

    fn check_inputs(params: &LaunchParameters) -> Result<(), SimulationError> {
        let strictly_positive = [
            ("bottle volume", params.bottle_volume_l),
            ("bottle diameter", params.bottle_diameter_cm),
            ("output diameter", params.output_diameter_cm),
            ("empty mass", params.empty_mass_kg),
            ("ramp length", params.ramp_length_cm),
            ("initial pressure", params.initial_pressure_bar),
            ("initial water volume", params.initial_water_volume_l),
            ("gravity", params.gravity),
            ("water density", params.water_density),
            ("air density", params.air_density),
            ("atmospheric pressure", params.atmospheric_pressure),
        ];
        for (name, value) in strictly_positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "{} must be a positive finite value, got {}",
                    name, value
                )));
            }
        }

        if !params.drag_coefficient.is_finite() || params.drag_coefficient < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "drag coefficient must be non-negative, got {}",
                params.drag_coefficient
            )));
        }

        if !params.tilt_angle_deg.is_finite()
            || params.tilt_angle_deg <= 0.0
            || params.tilt_angle_deg > 90.0
        {
            return Err(SimulationError::InvalidConfiguration(format!(
                "tilt angle must lie in (0, 90] degrees, got {}",
                params.tilt_angle_deg
            )));
        }

        if params.output_diameter_cm >= params.bottle_diameter_cm {
            return Err(SimulationError::InvalidConfiguration(format!(
                "output diameter ({} cm) must be smaller than bottle diameter ({} cm)",
                params.output_diameter_cm, params.bottle_diameter_cm
            )));
        }

        if params.initial_water_volume_l >= params.bottle_volume_l {
            return Err(SimulationError::InvalidConfiguration(format!(
                "initial water volume ({} L) must be smaller than bottle volume ({} L)",
                params.initial_water_volume_l, params.bottle_volume_l
            )));
        }

        Ok(())
    }

    fn calculate_ramp_exit(&self) -> Result<RampExit, SimulationError> {
        let wet_mass = self.wet_mass();
        let ramp_incline = ((90.0 - self.tilt_angle) * PI / 180.0).cos();
        let acceleration = (self.initial_pressure * self.output_section
            - wet_mass * self.gravity * ramp_incline)
            / wet_mass;

        if !acceleration.is_finite() || acceleration <= 0.0 {
            return Err(SimulationError::domain(
                FlightPhase::WaterEjection,
                0,
                format!(
                    "ramp exit acceleration is {:.6} m/s², pressure cannot push the rocket up the ramp",
                    acceleration
                ),
            ));
        }

        let ramp_length = match self.ramp_length_convention {
            RampLengthConvention::Centimeters => self.ramp_length / CENTIMETERS_TO_METERS,
            RampLengthConvention::Meters => self.ramp_length,
        };
        let time = (2.0 * ramp_length / acceleration).sqrt();

        Ok(RampExit {
            acceleration,
            time,
            speed: acceleration * time,
        })
    }

    /// Effective discharge density of the water phase:
    /// `rho_water * (1 - (A_out / A_bottle)²)`.
    pub fn beta(&self) -> f64 {
        self.water_density * (1.0 - (self.output_section / self.bottle_section).powi(2))
    }

    /// Rocket mass with its full initial water load.
    pub fn wet_mass(&self) -> f64 {
        self.empty_mass + self.water_density * self.initial_water_volume
    }

    pub fn initial_air_volume(&self) -> f64 {
        self.bottle_volume - self.initial_water_volume
    }

    /// Absolute pressure times volume of the air charge, constant under Boyle's law.
    pub fn charge_constant(&self) -> f64 {
        (self.initial_pressure + self.atmospheric_pressure) * self.initial_air_volume()
    }

    /// Volume the air charge would occupy once expanded to atmospheric pressure.
    pub fn final_air_volume(&self) -> f64 {
        self.charge_constant() / self.atmospheric_pressure
    }

    pub fn ramp_exit(&self) -> RampExit {
        self.ramp_exit
    }

    pub fn bottle_volume(&self) -> f64 {
        self.bottle_volume
    }

    pub fn bottle_section(&self) -> f64 {
        self.bottle_section
    }

    pub fn output_section(&self) -> f64 {
        self.output_section
    }

    pub fn empty_mass(&self) -> f64 {
        self.empty_mass
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn tilt_angle(&self) -> f64 {
        self.tilt_angle
    }

    pub fn ramp_length(&self) -> f64 {
        self.ramp_length
    }

    pub fn initial_pressure(&self) -> f64 {
        self.initial_pressure
    }

    pub fn initial_water_volume(&self) -> f64 {
        self.initial_water_volume
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn water_density(&self) -> f64 {
        self.water_density
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn atmospheric_pressure(&self) -> f64 {
        self.atmospheric_pressure
    }

    pub fn ramp_length_convention(&self) -> RampLengthConvention {
        self.ramp_length_convention
    }
}

fn disc_area(diameter: f64) -> f64 {
    PI * diameter.powi(2) / 4.0
}
