mod aero_coef;
mod aircraft;
mod controls;
mod geometry;
mod ground;
mod loader;
mod mass;
mod propulsion;

pub use aero_coef::{
    AircraftAeroCoefficients, DragCoefficients, GroundEffectConfig, LiftCoefficients,
    PitchCoefficients, RollCoefficients, SideForceCoefficients, StallCoefficients,
    YawCoefficients,
};
pub use aircraft::{AircraftConfig, AircraftSource, AircraftType};
pub use controls::ControlSurfaceConfig;
pub use geometry::AircraftGeometry;
pub use ground::GroundHandlingConfig;
pub use loader::ConfigError;
pub use mass::MassModel;
pub use propulsion::{EngineConfig, EngineType, JetConfig, PistonConfig, PropulsionConfig};
