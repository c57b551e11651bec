mod integrator;
mod rigid_body;

pub use integrator::{angular_acceleration, integrate_orientation, rk4_linear};
pub use rigid_body::{ForceAccumulator, RigidBody};
