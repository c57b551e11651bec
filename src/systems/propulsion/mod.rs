mod engine;
mod jet;
mod piston;
mod powerplant;

pub use engine::{Engine, FlightConditions};
pub use jet::{JetEngine, JET_START_N2_THRESHOLD};
pub use piston::{
    PistonEngine, PISTON_START_MAX_THROTTLE, PISTON_START_MIN_MIXTURE, PISTON_START_RPM_THRESHOLD,
};
pub use powerplant::{PropulsionOutput, PropulsionSystem};
