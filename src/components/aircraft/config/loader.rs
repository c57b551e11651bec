use bevy::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::components::aircraft::config::{AircraftConfig, EngineType};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
}

impl AircraftConfig {
    /// Loads and validates an aircraft configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    /// Parses and validates an aircraft configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: AircraftConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_yaml::to_string(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Checks the physical consistency of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mass = &self.mass;
        if mass.empty_mass <= 0.0 {
            return Err(invalid(format!(
                "empty mass must be positive, got {}",
                mass.empty_mass
            )));
        }
        if mass.max_fuel_mass < 0.0 {
            return Err(invalid("fuel capacity cannot be negative".to_string()));
        }
        if mass.max_takeoff_mass < mass.empty_mass {
            return Err(invalid(format!(
                "max takeoff mass {} is below empty mass {}",
                mass.max_takeoff_mass, mass.empty_mass
            )));
        }
        if mass.ixx <= 0.0 || mass.iyy <= 0.0 || mass.izz <= 0.0 {
            return Err(invalid("principal inertias must be positive".to_string()));
        }
        if mass.inertia().try_inverse().is_none() {
            return Err(invalid("inertia tensor is singular".to_string()));
        }

        let geometry = &self.geometry;
        if geometry.wing_area <= 0.0 || geometry.wing_span <= 0.0 || geometry.mac <= 0.0 {
            return Err(invalid(
                "wing area, span and chord must be positive".to_string(),
            ));
        }

        let aero = &self.aero_coef;
        if aero.lift.c_l_max <= 0.0 {
            return Err(invalid("maximum lift coefficient must be positive".to_string()));
        }
        if aero.drag.oswald_efficiency <= 0.0 {
            return Err(invalid("Oswald efficiency must be positive".to_string()));
        }
        if aero.stall.alpha_stall <= 0.0 || aero.stall.stall_transition <= 0.0 {
            return Err(invalid(
                "stall angle and transition width must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ground_effect.max_reduction) {
            return Err(invalid(
                "ground effect reduction must lie in [0, 1]".to_string(),
            ));
        }
        if matches!(self.ground_effect.reference_height, Some(height) if height <= 0.0) {
            return Err(invalid(
                "ground effect reference height must be positive".to_string(),
            ));
        }

        let ground = &self.ground_handling;
        if ground.main_gear_arm < 0.0 || ground.max_ground_pitch <= 0.0 {
            return Err(invalid(
                "main gear arm cannot be negative and the tail clearance must be positive"
                    .to_string(),
            ));
        }

        for engine in &self.propulsion.engines {
            match &engine.kind {
                EngineType::Jet(jet) => {
                    if jet.max_thrust <= 0.0 || jet.n1_max <= jet.n1_idle {
                        return Err(invalid(format!(
                            "jet engine '{}' needs positive thrust and n1_max above n1_idle",
                            engine.name
                        )));
                    }
                }
                EngineType::Piston(piston) => {
                    if piston.max_power <= 0.0
                        || piston.prop_diameter <= 0.0
                        || piston.max_rpm <= piston.idle_rpm
                    {
                        return Err(invalid(format!(
                            "piston engine '{}' needs positive power, a propeller and max_rpm above idle_rpm",
                            engine.name
                        )));
                    }
                }
            }
        }

        let controls = &self.controls;
        let rates = [
            controls.aileron_rate,
            controls.elevator_rate,
            controls.rudder_rate,
            controls.flap_rate,
            controls.spoiler_rate,
            controls.speed_brake_rate,
        ];
        if rates.iter().any(|rate| *rate <= 0.0) || controls.gear_cycle_time <= 0.0 {
            return Err(invalid("actuator rates must be positive".to_string()));
        }
        if controls.flap_max_deflection <= 0.0 {
            return Err(invalid("flap travel must be positive".to_string()));
        }

        if self.propulsion.engines.is_empty() {
            warn!("Aircraft '{}' has no engines configured", self.name);
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    error!("{}", message);
    ConfigError::ValidationError(message)
}
