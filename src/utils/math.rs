use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Advances `current` toward `target` with a first-order lag of time constant `tau`.
///
/// Uses the exact exponential solution `x(t+dt) = target + (x(t) - target) * exp(-dt/tau)`,
/// so the response is stable for any `dt`. A non-positive time constant snaps to the target.
#[inline]
pub fn first_order_lag(current: f64, target: f64, tau: f64, dt: f64) -> f64 {
    if tau > 1e-6 {
        target + (current - target) * (-dt / tau).exp()
    } else {
        target
    }
}

/// Moves `current` toward `target` by at most `max_step`.
#[inline]
pub fn move_towards(current: f64, target: f64, max_step: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Body rates in the stability convention (p, q, r) from a body-frame angular velocity.
///
/// Body axes are +X forward, +Y up, +Z right wing. Roll (p) is about +X, pitch (q) about +Z
/// and yaw (r, nose right positive) about -Y.
#[inline]
pub fn body_rates(angular_velocity: &Vector3<f64>) -> (f64, f64, f64) {
    (angular_velocity.x, angular_velocity.z, -angular_velocity.y)
}

/// Body-frame moment vector from roll, pitch and yaw (nose right positive) moments.
#[inline]
pub fn moment_from_axes(roll: f64, pitch: f64, yaw: f64) -> Vector3<f64> {
    Vector3::new(roll, -yaw, pitch)
}

/// Orientation for a level aircraft pointing along `heading` (radians, clockwise seen from above).
pub fn heading_orientation(heading: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -heading)
}

/// Orientation from roll, pitch and heading in radians, the inverse of [`orientation_to_euler`].
pub fn euler_orientation(roll: f64, pitch: f64, heading: f64) -> UnitQuaternion<f64> {
    heading_orientation(heading)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), roll)
}

/// Convert an orientation to (roll, pitch, heading) in radians.
pub fn orientation_to_euler(orientation: &UnitQuaternion<f64>) -> Vector3<f64> {
    let forward = orientation * Vector3::x();
    let up = orientation * Vector3::y();
    let right = orientation * Vector3::z();

    let pitch = forward.y.clamp(-1.0, 1.0).asin();
    let heading = forward.z.atan2(forward.x);
    let roll = (-right.y).atan2(up.y);

    Vector3::new(roll, pitch, heading)
}
