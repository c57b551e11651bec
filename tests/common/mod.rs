mod assertions;
mod fixtures;
mod helpers;
mod test_app;

// Re-export
pub use assertions::{assert_aircraft_state_valid, assert_position_eq, assert_unit_quaternion};

pub use helpers::*;

pub use fixtures::*;
pub use test_app::{TestApp, TestAppBuilder};
