mod actuator;

pub use actuator::{control_effectiveness, ControlSurfaceSystem};
