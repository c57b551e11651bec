use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::components::aircraft::config::{
    AircraftAeroCoefficients, AircraftGeometry, ConfigError, ControlSurfaceConfig,
    GroundEffectConfig, GroundHandlingConfig, MassModel, PropulsionConfig,
};

/// The full aircraft configuration: mass, geometry, aerodynamics, engines and controls.
///
/// Supplied once when the flight model is built and read-only afterwards, apart from the
/// aerodynamic parts that a live reconfiguration may replace.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftConfig {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    pub ac_type: AircraftType,
    /// Mass bounds, centre of gravity and inertia.
    pub mass: MassModel,
    /// Aerodynamic reference geometry.
    pub geometry: AircraftGeometry,
    /// Aerodynamic coefficients for calculating forces and moments on the aircraft.
    pub aero_coef: AircraftAeroCoefficients,
    #[serde(default)]
    pub ground_effect: GroundEffectConfig,
    pub propulsion: PropulsionConfig,
    #[serde(default)]
    pub controls: ControlSurfaceConfig,
    #[serde(default)]
    pub ground_handling: GroundHandlingConfig,
}

impl Default for AircraftConfig {
    /// The `Cessna172` configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::cessna_172()
    }
}

impl AircraftConfig {
    /// Creates a new aircraft configuration from a given source.
    ///
    /// # Arguments
    /// * `source` - An `AircraftSource` enum specifying if the configuration is hardcoded
    ///              (`Programmed`) or loaded from a file (`File`).
    ///
    /// # Returns
    /// A `Result` containing the new configuration or an error if the file fails to load
    /// or does not validate.
    pub fn new(source: AircraftSource) -> Result<Self, ConfigError> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Ok(Self::from_programmed(aircraft_type)),
            AircraftSource::File(path) => Self::from_file(path),
        }
    }

    /// Creates an aircraft configuration for predefined (programmed) types.
    fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::Cessna172 => Self {
                name: "Cessna172".to_string(),
                ac_type: AircraftType::Cessna172,
                mass: MassModel::cessna_172(),
                geometry: AircraftGeometry::cessna_172(),
                aero_coef: AircraftAeroCoefficients::cessna_172(),
                ground_effect: GroundEffectConfig::default(),
                propulsion: PropulsionConfig::cessna_172(),
                controls: ControlSurfaceConfig::cessna_172(),
                ground_handling: GroundHandlingConfig::default(),
            },
            AircraftType::LightJet => Self {
                name: "LightJet".to_string(),
                ac_type: AircraftType::LightJet,
                mass: MassModel::light_jet(),
                geometry: AircraftGeometry::light_jet(),
                aero_coef: AircraftAeroCoefficients::light_jet(),
                ground_effect: GroundEffectConfig {
                    reference_height: None,
                    max_reduction: 0.6,
                },
                propulsion: PropulsionConfig::light_jet(),
                controls: ControlSurfaceConfig::light_jet(),
                ground_handling: GroundHandlingConfig {
                    steering_moment: 12000.0,
                    main_gear_arm: 0.6,
                    max_ground_pitch: 0.24,
                    ..Default::default()
                },
            },
            AircraftType::Custom(name) => Self {
                name: name.clone(),
                ac_type: AircraftType::Custom(name),
                ..Self::from_programmed(AircraftType::Cessna172)
            },
        }
    }

    pub fn cessna_172() -> Self {
        Self::from_programmed(AircraftType::Cessna172)
    }

    pub fn light_jet() -> Self {
        Self::from_programmed(AircraftType::LightJet)
    }
}

/// Source for aircraft configuration.
/// Can either be a hardcoded configuration (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

/// Enumeration of available aircraft types.
#[derive(Component, Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum AircraftType {
    Cessna172,
    LightJet,
    Custom(String),
}
