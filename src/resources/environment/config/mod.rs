mod wind;

pub use wind::WindProfile;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Weather perturbation applied on top of the standard atmosphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Wind velocity above the boundary layer, world frame (m/s).
    pub wind: Vector3<f64>,
    pub wind_profile: WindProfile,
    /// Uniform temperature offset from ISA (K).
    pub temperature_offset: f64,
    /// Uniform static pressure offset from ISA (Pa).
    pub pressure_offset: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            wind: Vector3::zeros(),
            wind_profile: WindProfile::default(),
            temperature_offset: 0.0,
            pressure_offset: 0.0,
        }
    }
}

impl WeatherConfig {
    /// Calm ISA day.
    pub fn calm() -> Self {
        Self::default()
    }

    /// Horizontal wind blowing *from* `direction` (radians, clockwise from the world +X axis).
    pub fn with_wind_from(speed: f64, direction: f64) -> Self {
        Self {
            wind: Vector3::new(-speed * direction.cos(), 0.0, -speed * direction.sin()),
            ..Default::default()
        }
    }
}
