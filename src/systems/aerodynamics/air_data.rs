use nalgebra::{UnitQuaternion, Vector3};

use crate::utils::MIN_AIRSPEED;

const MIN_AIRSPEED_THRESHOLD: f64 = 1e-6;

/// Air-relative velocity of the aircraft resolved in body axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirDataValues {
    pub true_airspeed: f64,
    pub alpha: f64,
    pub beta: f64,
    pub relative_velocity_body: Vector3<f64>,
}

/// Computes airspeed, angle of attack and sideslip from world-frame velocity and wind.
pub fn calculate_air_data(
    velocity: &Vector3<f64>,
    wind: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> AirDataValues {
    let relative_velocity_body = orientation.inverse_transform_vector(&(velocity - wind));
    let true_airspeed = relative_velocity_body.norm();

    AirDataValues {
        true_airspeed,
        alpha: calculate_alpha(&relative_velocity_body, true_airspeed),
        beta: calculate_beta(&relative_velocity_body, true_airspeed),
        relative_velocity_body,
    }
}

/// Positive when the relative wind comes from below the nose.
fn calculate_alpha(relative_velocity: &Vector3<f64>, airspeed: f64) -> f64 {
    if airspeed > MIN_AIRSPEED_THRESHOLD {
        (-relative_velocity.y).atan2(relative_velocity.x)
    } else {
        0.0
    }
}

/// Positive when the relative wind comes from the right.
fn calculate_beta(relative_velocity: &Vector3<f64>, airspeed: f64) -> f64 {
    if airspeed > MIN_AIRSPEED_THRESHOLD {
        (relative_velocity.z / airspeed).clamp(-1.0, 1.0).asin()
    } else {
        0.0
    }
}

/// Snapshot of everything the aerodynamic model needs from the flight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroState {
    /// True airspeed (m/s). Drives dynamic pressure, so zero airspeed yields zero force.
    pub airspeed: f64,
    pub alpha: f64,
    pub beta: f64,
    /// Body-frame angular velocity (rad/s)
    pub angular_velocity: Vector3<f64>,
    /// Height above the ground plane (m)
    pub height_agl: f64,
}

impl AeroState {
    pub fn from_air_data(
        air_data: &AirDataValues,
        angular_velocity: Vector3<f64>,
        height_agl: f64,
    ) -> Self {
        Self {
            airspeed: air_data.true_airspeed,
            alpha: air_data.alpha,
            beta: air_data.beta,
            angular_velocity,
            height_agl,
        }
    }

    /// Airspeed used to non-dimensionalize body rates, never below the airspeed floor.
    pub fn rate_reference_speed(&self) -> f64 {
        self.airspeed.max(MIN_AIRSPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_flight_has_no_incidence() {
        let air = calculate_air_data(
            &Vector3::new(50.0, 0.0, 0.0),
            &Vector3::zeros(),
            &UnitQuaternion::identity(),
        );
        assert_relative_eq!(air.true_airspeed, 50.0);
        assert_eq!(air.alpha, 0.0);
        assert_eq!(air.beta, 0.0);
    }

    #[test]
    fn test_nose_up_attitude_gives_positive_alpha() {
        let pitched = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.1);
        let air = calculate_air_data(&Vector3::new(50.0, 0.0, 0.0), &Vector3::zeros(), &pitched);
        assert_relative_eq!(air.alpha, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_wind_from_right_gives_positive_beta() {
        // Air moving toward -Z (from the right wing side).
        let air = calculate_air_data(
            &Vector3::new(50.0, 0.0, 0.0),
            &Vector3::new(0.0, 0.0, -5.0),
            &UnitQuaternion::identity(),
        );
        assert!(air.beta > 0.0);
        assert_relative_eq!(air.true_airspeed, (2525.0f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_headwind_adds_airspeed() {
        let air = calculate_air_data(
            &Vector3::new(40.0, 0.0, 0.0),
            &Vector3::new(-10.0, 0.0, 0.0),
            &UnitQuaternion::identity(),
        );
        assert_relative_eq!(air.true_airspeed, 50.0);
    }

    #[test]
    fn test_zero_airspeed_is_finite() {
        let air = calculate_air_data(&Vector3::zeros(), &Vector3::zeros(), &UnitQuaternion::identity());
        assert_eq!(air.true_airspeed, 0.0);
        assert_eq!(air.alpha, 0.0);
        assert_eq!(air.beta, 0.0);
    }
}
