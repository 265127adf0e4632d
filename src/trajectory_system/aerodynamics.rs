use crate::control::configuration::RocketConfiguration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub surface_area: f64,
    pub air_density: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, surface_area: f64, air_density: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            surface_area,
            air_density,
        }
    }

    /// Drag acts on the bottle's frontal section.
    pub fn from_configuration(config: &RocketConfiguration) -> Self {
        Aerodynamics::new(
            config.drag_coefficient(),
            config.bottle_section(),
            config.air_density(),
        )
    }

    pub fn calculate_drag(&self, speed: f64) -> f64 {
        self.calculate_dynamic_pressure(speed) * self.surface_area * self.drag_coefficient
    }

    fn calculate_dynamic_pressure(&self, speed: f64) -> f64 {
        0.5 * self.air_density * speed.powi(2)
    }
}
