use approx::assert_relative_eq;
use flyer_fdm::components::AircraftState;
use nalgebra::{UnitQuaternion, Vector3};

/// Assert that a published aircraft state is physically sane
#[track_caller]
pub fn assert_aircraft_state_valid(state: &AircraftState) {
    assert!(
        state.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite: {:?}",
        state.velocity
    );
    assert!(
        state.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite: {:?}",
        state.angular_velocity
    );
    assert_unit_quaternion(&state.orientation, 1e-9);

    assert!(state.mass > 0.0, "Mass must be positive");
    assert!(state.mass.is_finite(), "Mass must be finite");
    assert!(state.fuel_mass >= 0.0, "Fuel mass went negative");
    assert!(state.fuel_flow >= 0.0, "Fuel flow went negative");
    assert!(
        (0.0..=1.0).contains(&state.throttle),
        "Throttle out of range: {}",
        state.throttle
    );
}

/// Assert that an orientation is still a unit quaternion
#[track_caller]
pub fn assert_unit_quaternion(orientation: &UnitQuaternion<f64>, tolerance: f64) {
    let norm = orientation.quaternion().norm();
    assert!(
        (norm - 1.0).abs() <= tolerance,
        "Quaternion norm drifted to {}",
        norm
    );
}

/// Assert two positions are equal within tolerance
#[track_caller]
pub fn assert_position_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}
