use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::config::WeatherConfig;
use crate::utils::{
    AIR_GAS_CONSTANT, AIR_HEAT_CAPACITY_RATIO, GRAVITY, ISA_LAPSE_RATE, ISA_SEA_LEVEL_PRESSURE,
    ISA_SEA_LEVEL_TEMP, ISA_STRATOPAUSE_LOWER_ALTITUDE, ISA_TROPOPAUSE_ALTITUDE,
    ISA_UPPER_STRATOSPHERE_LAPSE_RATE, SUTHERLAND_CONSTANT, SUTHERLAND_REFERENCE_TEMP,
    SUTHERLAND_REFERENCE_VISCOSITY,
};

/// Thermodynamic state of the air at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereProperties {
    /// Static temperature (K).
    pub temperature: f64,
    /// Static pressure (Pa).
    pub pressure: f64,
    /// Density (kg/m³).
    pub density: f64,
    /// Speed of sound (m/s).
    pub speed_of_sound: f64,
    /// Dynamic viscosity (Pa·s).
    pub dynamic_viscosity: f64,
    /// Kinematic viscosity (m²/s).
    pub kinematic_viscosity: f64,
}

impl Default for AtmosphereProperties {
    fn default() -> Self {
        Atmosphere::default().properties(0.0)
    }
}

/// Three-band standard atmosphere with a uniform weather offset and a wind profile.
///
/// Bands: troposphere (linear lapse to 11 km), lower stratosphere (isothermal to 20 km),
/// upper stratosphere (linear re-warming). Each band's pressure is the closed-form barometric
/// relation seeded from the band below, so pressure is continuous at the boundaries.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Atmosphere {
    weather: WeatherConfig,
}

impl Atmosphere {
    pub fn new(weather: WeatherConfig) -> Self {
        Self { weather }
    }

    pub fn weather(&self) -> &WeatherConfig {
        &self.weather
    }

    pub fn set_weather(&mut self, weather: WeatherConfig) {
        debug!(
            "Weather set: wind {:?}, dT {:+.1} K, dP {:+.0} Pa",
            weather.wind, weather.temperature_offset, weather.pressure_offset
        );
        self.weather = weather;
    }

    /// Back to a calm ISA day.
    pub fn reset(&mut self) {
        self.weather = WeatherConfig::default();
    }

    /// ISA temperature and pressure at `altitude` without weather offsets.
    pub fn standard_temperature_pressure(altitude: f64) -> (f64, f64) {
        let tropopause_temp = ISA_SEA_LEVEL_TEMP + ISA_LAPSE_RATE * ISA_TROPOPAUSE_ALTITUDE;
        let tropo_exponent = -GRAVITY / (ISA_LAPSE_RATE * AIR_GAS_CONSTANT);

        if altitude <= ISA_TROPOPAUSE_ALTITUDE {
            let temperature = ISA_SEA_LEVEL_TEMP + ISA_LAPSE_RATE * altitude;
            let pressure =
                ISA_SEA_LEVEL_PRESSURE * (temperature / ISA_SEA_LEVEL_TEMP).powf(tropo_exponent);
            return (temperature, pressure);
        }

        let tropopause_pressure =
            ISA_SEA_LEVEL_PRESSURE * (tropopause_temp / ISA_SEA_LEVEL_TEMP).powf(tropo_exponent);
        let isothermal = |height: f64| {
            tropopause_pressure
                * (-GRAVITY * (height - ISA_TROPOPAUSE_ALTITUDE)
                    / (AIR_GAS_CONSTANT * tropopause_temp))
                    .exp()
        };

        if altitude <= ISA_STRATOPAUSE_LOWER_ALTITUDE {
            return (tropopause_temp, isothermal(altitude));
        }

        let base_pressure = isothermal(ISA_STRATOPAUSE_LOWER_ALTITUDE);
        let temperature = tropopause_temp
            + ISA_UPPER_STRATOSPHERE_LAPSE_RATE * (altitude - ISA_STRATOPAUSE_LOWER_ALTITUDE);
        let exponent = -GRAVITY / (ISA_UPPER_STRATOSPHERE_LAPSE_RATE * AIR_GAS_CONSTANT);
        let pressure = base_pressure * (temperature / tropopause_temp).powf(exponent);
        (temperature, pressure)
    }

    /// Air properties at `altitude` metres, weather offsets included.
    pub fn properties(&self, altitude: f64) -> AtmosphereProperties {
        let (standard_temp, standard_pressure) = Self::standard_temperature_pressure(altitude);
        let temperature = standard_temp + self.weather.temperature_offset;
        let pressure = standard_pressure + self.weather.pressure_offset;

        let density = pressure / (AIR_GAS_CONSTANT * temperature);
        let speed_of_sound = (AIR_HEAT_CAPACITY_RATIO * AIR_GAS_CONSTANT * temperature).sqrt();
        let dynamic_viscosity = SUTHERLAND_REFERENCE_VISCOSITY
            * (temperature / SUTHERLAND_REFERENCE_TEMP).powf(1.5)
            * (SUTHERLAND_REFERENCE_TEMP + SUTHERLAND_CONSTANT)
            / (temperature + SUTHERLAND_CONSTANT);

        AtmosphereProperties {
            temperature,
            pressure,
            density,
            speed_of_sound,
            dynamic_viscosity,
            kinematic_viscosity: dynamic_viscosity / density,
        }
    }

    /// World-frame wind at `height_agl` metres above ground.
    pub fn wind_at(&self, height_agl: f64) -> Vector3<f64> {
        self.weather.wind * self.weather.wind_profile.scale(height_agl)
    }
}
