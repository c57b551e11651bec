use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{SimError, DEFAULT_FIXED_TIMESTEP, GRAVITY, MAX_FRAME_TIME};

/// Settings for the fixed-timestep loop driving the flight model.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physics step size (s).
    pub fixed_timestep: f64,
    /// Largest frame time accepted by a single `update` call (s).
    pub max_frame_time: f64,
    /// Gravitational acceleration (m/s²). Zero disables gravity.
    pub gravity: f64,
    /// Master seed for the deterministic random streams.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            max_frame_time: MAX_FRAME_TIME,
            gravity: GRAVITY,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn with_rate(rate_hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / rate_hz,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "fixed timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.max_frame_time < self.fixed_timestep {
            return Err(SimError::InvalidConfig(format!(
                "max frame time {} is shorter than the fixed timestep {}",
                self.max_frame_time, self.fixed_timestep
            )));
        }
        if !(self.gravity >= 0.0 && self.gravity.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite and non-negative, got {}",
                self.gravity
            )));
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}
