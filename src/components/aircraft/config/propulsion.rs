use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::GRAVITY;

/// Ratings for a two-spool turbofan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetConfig {
    /// Sea-level static thrust at maximum N1 (N)
    pub max_thrust: f64,
    /// Fraction of `max_thrust` produced at idle N1
    pub idle_thrust_fraction: f64,
    /// N1 at idle (%)
    pub n1_idle: f64,
    /// N1 at full throttle (%)
    pub n1_max: f64,
    /// N2 as a multiple of N1
    pub n2_ratio: f64,
    /// Time constant of the N1 spool response (s)
    pub spool_time_constant: f64,
    pub bypass_ratio: f64,
    /// Thrust specific fuel consumption (kg/N/s)
    pub tsfc: f64,
    /// Exhaust gas temperature at idle and at 100% N1 (°C)
    pub egt_idle: f64,
    pub egt_max: f64,
}

impl Default for JetConfig {
    fn default() -> Self {
        Self {
            max_thrust: 17000.0,
            idle_thrust_fraction: 0.05,
            n1_idle: 22.0,
            n1_max: 100.0,
            n2_ratio: 1.05,
            spool_time_constant: 2.5,
            bypass_ratio: 4.0,
            // 0.7 lb/lbf/h
            tsfc: 0.7 / 3600.0 / GRAVITY,
            egt_idle: 400.0,
            egt_max: 850.0,
        }
    }
}

/// Ratings for a piston engine driving a fixed-pitch propeller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PistonConfig {
    /// Rated shaft power at sea level (W)
    pub max_power: f64,
    pub max_rpm: f64,
    pub idle_rpm: f64,
    /// Propeller diameter (m)
    pub prop_diameter: f64,
    /// Peak propeller efficiency
    pub prop_efficiency: f64,
    /// Advance ratio of peak efficiency
    pub optimal_advance_ratio: f64,
    /// Static thrust per watt of power (N/W)
    pub static_thrust_per_watt: f64,
    /// Brake specific fuel consumption (kg/J)
    pub bsfc: f64,
    /// RPM lag time constant (s)
    pub rpm_time_constant: f64,
    /// Cylinder head and oil temperature lags (s)
    pub cht_time_constant: f64,
    pub oil_time_constant: f64,
    /// Below this RPM the oil pump delivers no pressure
    pub min_oil_pressure_rpm: f64,
}

impl Default for PistonConfig {
    fn default() -> Self {
        Self {
            max_power: 119_312.0,
            max_rpm: 2700.0,
            idle_rpm: 700.0,
            prop_diameter: 1.905,
            prop_efficiency: 0.8,
            optimal_advance_ratio: 0.7,
            static_thrust_per_watt: 0.022,
            bsfc: 6.0e-8,
            rpm_time_constant: 0.8,
            cht_time_constant: 60.0,
            oil_time_constant: 120.0,
            min_oil_pressure_rpm: 300.0,
        }
    }
}

/// Engine kind with its type-specific ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineType {
    Jet(JetConfig),
    Piston(PistonConfig),
}

/// Configuration for a single aircraft engine
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the powerplant
    pub name: String,
    /// Engine position in the body frame (m)
    pub position: Vector3<f64>,
    /// Thrust line direction in the body frame
    pub orientation: Vector3<f64>,
    pub kind: EngineType,
}

impl EngineConfig {
    pub fn jet(name: &str, config: JetConfig) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::zeros(),
            orientation: Vector3::x(),
            kind: EngineType::Jet(config),
        }
    }

    pub fn piston(name: &str, config: PistonConfig) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::zeros(),
            orientation: Vector3::x(),
            kind: EngineType::Piston(config),
        }
    }

    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.position = position;
        self
    }

    /// Unit thrust direction, falling back to the body X axis for a degenerate vector.
    pub fn thrust_axis(&self) -> Vector3<f64> {
        self.orientation
            .try_normalize(1e-9)
            .unwrap_or_else(Vector3::x)
    }
}

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropulsionConfig {
    /// Configurations for each engine
    pub engines: Vec<EngineConfig>,
}

impl PropulsionConfig {
    /// Creates a new single-engine configuration
    pub fn single_engine(engine: EngineConfig) -> Self {
        Self {
            engines: vec![engine],
        }
    }

    /// Creates a twin-engine configuration placed symmetrically about the centreline.
    ///
    /// `lateral_offset` is measured along the right wing (+Z).
    pub fn twin_engine(
        engine: EngineConfig,
        x_offset: f64,
        y_offset: f64,
        lateral_offset: f64,
    ) -> Self {
        let left_engine = EngineConfig {
            position: Vector3::new(x_offset, y_offset, -lateral_offset),
            name: format!("{} (left)", engine.name),
            ..engine.clone()
        };
        let right_engine = EngineConfig {
            position: Vector3::new(x_offset, y_offset, lateral_offset),
            name: format!("{} (right)", engine.name),
            ..engine
        };
        Self {
            engines: vec![left_engine, right_engine],
        }
    }

    pub fn cessna_172() -> Self {
        Self::single_engine(
            EngineConfig::piston("O-320", PistonConfig::default())
                .with_position(Vector3::new(1.5, 0.0, 0.0)),
        )
    }

    pub fn light_jet() -> Self {
        Self::twin_engine(EngineConfig::jet("FJ44", JetConfig::default()), -2.0, 0.8, 1.2)
    }
}
