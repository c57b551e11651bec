pub mod config;
pub mod state;

pub use config::{
    AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, AircraftSource, AircraftType,
    ConfigError, ControlSurfaceConfig, EngineConfig, EngineType, GroundEffectConfig,
    GroundHandlingConfig, JetConfig, MassModel, PistonConfig, PropulsionConfig, StallCoefficients,
};
pub use state::{AirData, AircraftState, Attitude};
