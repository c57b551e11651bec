use nalgebra::{Matrix3, UnitQuaternion, Vector3};

use crate::utils::ROTATION_EPSILON;

/// State derivatives for one Runge-Kutta stage
struct StateDerivatives {
    velocity: Vector3<f64>,
    acceleration: Vector3<f64>,
}

/// Advances position and velocity over `dt` with the classic four-stage weighting.
///
/// The acceleration is held constant over the step, so every stage samples the same value
/// and the result equals `x + v·dt + ½·a·dt²`, `v + a·dt`.
pub fn rk4_linear(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    acceleration: &Vector3<f64>,
    dt: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let stage = |velocity: Vector3<f64>| StateDerivatives {
        velocity,
        acceleration: *acceleration,
    };

    let k1 = stage(*velocity);
    let k2 = stage(velocity + k1.acceleration * (dt / 2.0));
    let k3 = stage(velocity + k2.acceleration * (dt / 2.0));
    let k4 = stage(velocity + k3.acceleration * dt);

    let new_position =
        position + (k1.velocity + k2.velocity * 2.0 + k3.velocity * 2.0 + k4.velocity) * (dt / 6.0);
    let new_velocity = velocity
        + (k1.acceleration + k2.acceleration * 2.0 + k3.acceleration * 2.0 + k4.acceleration)
            * (dt / 6.0);

    (new_position, new_velocity)
}

/// Angular acceleration from a body moment, including the gyroscopic term `ω × Iω`.
pub fn angular_acceleration(
    inertia: &Matrix3<f64>,
    inertia_inv: &Matrix3<f64>,
    moment: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
) -> Vector3<f64> {
    let gyro_term = angular_velocity.cross(&(inertia * angular_velocity));
    inertia_inv * (moment - gyro_term)
}

/// Rotates `orientation` by the body-frame rate `angular_velocity` over `dt`.
///
/// Uses the exponential map of `ω·dt` composed on the body side and renormalizes the result.
/// Rotations smaller than [`ROTATION_EPSILON`] leave the orientation untouched.
pub fn integrate_orientation(
    orientation: &UnitQuaternion<f64>,
    angular_velocity: &Vector3<f64>,
    dt: f64,
) -> UnitQuaternion<f64> {
    let rotation = angular_velocity * dt;
    if rotation.norm() <= ROTATION_EPSILON {
        return *orientation;
    }
    let updated = orientation * UnitQuaternion::from_scaled_axis(rotation);
    UnitQuaternion::from_quaternion(updated.into_inner().normalize())
}
