pub mod aircraft;
pub mod control_surfaces;
pub mod propulsion;

pub use aircraft::{
    AirData, AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, AircraftSource,
    AircraftState, AircraftType, Attitude, ConfigError, ControlSurfaceConfig, EngineConfig,
    EngineType, GroundEffectConfig, GroundHandlingConfig, JetConfig, MassModel, PistonConfig,
    PropulsionConfig, StallCoefficients,
};
pub use control_surfaces::{
    ControlDeflections, ControlEffectiveness, ControlInputs, ControlSurfaceState, Surface,
    SurfaceActuator, SurfaceAngles, TrimAxis, TrimState,
};
pub use propulsion::{EngineReadout, EngineStatus, FuelPlanning};
