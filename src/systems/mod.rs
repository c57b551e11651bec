pub mod aerodynamics;
pub mod controls;
pub mod flight_dynamics;
pub mod physics;
pub mod propulsion;

pub use aerodynamics::Aerodynamics;
pub use controls::ControlSurfaceSystem;
pub use flight_dynamics::{ConfigurationUpdate, FlightDynamics};
pub use physics::RigidBody;
pub use propulsion::{Engine, PropulsionSystem};
