use bevy::prelude::*;
use nalgebra::{Isometry3, Matrix3, Matrix4, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::integrator::{angular_acceleration, integrate_orientation, rk4_linear};

/// Forces and moments gathered during one step, in the body frame.
///
/// Obtained from [`RigidBody::clear_forces`] and consumed by
/// [`RigidBody::update_accelerations`], so it can never leak into the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceAccumulator {
    force: Vector3<f64>,
    moment: Vector3<f64>,
    cg: Vector3<f64>,
}

impl ForceAccumulator {
    fn new(cg: Vector3<f64>) -> Self {
        Self {
            force: Vector3::zeros(),
            moment: Vector3::zeros(),
            cg,
        }
    }

    pub fn apply_force(&mut self, force: &Vector3<f64>) {
        self.force += force;
    }

    pub fn apply_moment(&mut self, moment: &Vector3<f64>) {
        self.moment += moment;
    }

    /// Applies a force at a body-frame point, adding its moment about the centre of gravity.
    pub fn apply_force_at_point(&mut self, force: &Vector3<f64>, point: &Vector3<f64>) {
        self.force += force;
        self.moment += (point - self.cg).cross(force);
    }

    pub fn force(&self) -> &Vector3<f64> {
        &self.force
    }

    pub fn moment(&self) -> &Vector3<f64> {
        &self.moment
    }
}

/// Six degree of freedom rigid body.
///
/// Position and velocity are world frame, angular velocity is body frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    /// World-frame acceleration from the last [`RigidBody::update_accelerations`]
    pub acceleration: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub angular_acceleration: Vector3<f64>,
    mass: f64,
    inverse_mass: f64,
    inertia: Matrix3<f64>,
    inertia_inv: Matrix3<f64>,
    cg: Vector3<f64>,
    transform: Matrix4<f64>,
}

impl RigidBody {
    /// Dynamic body. A non-positive or non-finite mass gives a static body.
    pub fn new(mass: f64, inertia: Matrix3<f64>, cg: Vector3<f64>) -> Self {
        let inertia_inv = inertia.try_inverse().unwrap_or_else(|| {
            error!("Inertia matrix is uninvertible, defaulting to zero matrix.");
            Matrix3::zeros()
        });
        let mut body = Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
            mass: 0.0,
            inverse_mass: 0.0,
            inertia,
            inertia_inv,
            cg,
            transform: Matrix4::identity(),
        };
        body.set_mass(mass);
        body
    }

    /// Immovable body with infinite mass.
    pub fn static_body() -> Self {
        Self::new(f64::INFINITY, Matrix3::identity(), Vector3::zeros())
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn inertia(&self) -> &Matrix3<f64> {
        &self.inertia
    }

    pub fn inertia_inv(&self) -> &Matrix3<f64> {
        &self.inertia_inv
    }

    pub fn cg(&self) -> &Vector3<f64> {
        &self.cg
    }

    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// World transform rebuilt after every integration.
    pub fn transform(&self) -> &Matrix4<f64> {
        &self.transform
    }

    /// Changes the mass. The inertia tensor is left as it is.
    pub fn set_mass(&mut self, mass: f64) {
        if mass.is_finite() && mass > 0.0 {
            self.mass = mass;
            self.inverse_mass = 1.0 / mass;
        } else {
            self.mass = f64::INFINITY;
            self.inverse_mass = 0.0;
        }
    }

    /// Places the body and zeroes all motion.
    pub fn reset(&mut self, position: Vector3<f64>, orientation: UnitQuaternion<f64>) {
        self.position = position;
        self.orientation = orientation;
        self.velocity = Vector3::zeros();
        self.acceleration = Vector3::zeros();
        self.angular_velocity = Vector3::zeros();
        self.angular_acceleration = Vector3::zeros();
        self.rebuild_transform();
    }

    /// Starts a new step with empty force and moment buffers.
    pub fn clear_forces(&self) -> ForceAccumulator {
        ForceAccumulator::new(self.cg)
    }

    /// Converts accumulated body-frame loads into world linear and body angular acceleration.
    pub fn update_accelerations(&mut self, loads: ForceAccumulator) {
        if self.is_static() {
            self.acceleration = Vector3::zeros();
            self.angular_acceleration = Vector3::zeros();
            return;
        }
        self.acceleration = self.orientation * loads.force * self.inverse_mass;
        self.angular_acceleration = angular_acceleration(
            &self.inertia,
            &self.inertia_inv,
            &loads.moment,
            &self.angular_velocity,
        );
    }

    /// Advances the state by `dt` using the accelerations of the current step.
    pub fn integrate(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        let (position, velocity) = rk4_linear(&self.position, &self.velocity, &self.acceleration, dt);
        self.position = position;
        self.velocity = velocity;

        self.angular_velocity += self.angular_acceleration * dt;
        self.orientation = integrate_orientation(&self.orientation, &self.angular_velocity, dt);

        self.rebuild_transform();
    }

    /// Instantaneous change of body angular velocity from a moment acting for `dt`.
    pub fn apply_angular_impulse(&mut self, moment: &Vector3<f64>, dt: f64) {
        if !self.is_static() {
            self.angular_velocity += self.inertia_inv * moment * dt;
        }
    }

    /// Instantaneous change of velocity from a body-frame force acting for `dt`.
    pub fn apply_linear_impulse(&mut self, force: &Vector3<f64>, dt: f64) {
        self.velocity += self.orientation * force * (self.inverse_mass * dt);
    }

    /// Body-frame vector expressed in the world frame.
    pub fn body_to_world(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.orientation * vector
    }

    /// World-frame vector expressed in the body frame.
    pub fn world_to_body(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.inverse_transform_vector(vector)
    }

    pub fn rebuild_transform(&mut self) {
        self.transform =
            Isometry3::from_parts(Translation3::from(self.position), self.orientation)
                .to_homogeneous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body() -> RigidBody {
        RigidBody::new(
            1000.0,
            Matrix3::from_diagonal(&Vector3::new(1000.0, 3000.0, 2000.0)),
            Vector3::zeros(),
        )
    }

    #[test]
    fn test_zero_force_is_inertial() {
        let mut body = body();
        body.velocity = Vector3::new(30.0, 1.0, -2.0);
        let dt = 1.0 / 120.0;
        for step in 1..=600 {
            let loads = body.clear_forces();
            body.update_accelerations(loads);
            body.integrate(dt);
            let expected = Vector3::new(30.0, 1.0, -2.0) * (step as f64 * dt);
            assert_relative_eq!(body.position, expected, epsilon = 1e-9);
        }
        assert_eq!(body.velocity, Vector3::new(30.0, 1.0, -2.0));
    }

    #[test]
    fn test_force_is_rotated_to_world() {
        let mut body = body();
        body.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let mut loads = body.clear_forces();
        loads.apply_force(&Vector3::new(1000.0, 0.0, 0.0));
        body.update_accelerations(loads);
        assert_relative_eq!(body.acceleration, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_force_at_point_creates_moment() {
        let body = body();
        let mut loads = body.clear_forces();
        loads.apply_force_at_point(&Vector3::new(0.0, 10.0, 0.0), &Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(*loads.force(), Vector3::new(0.0, 10.0, 0.0));
        assert_eq!(*loads.moment(), Vector3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_clear_forces_starts_empty() {
        let body = body();
        let mut loads = body.clear_forces();
        loads.apply_force(&Vector3::new(5.0, 5.0, 5.0));
        loads.apply_moment(&Vector3::new(1.0, 0.0, 0.0));
        let fresh = body.clear_forces();
        assert_eq!(*fresh.force(), Vector3::zeros());
        assert_eq!(*fresh.moment(), Vector3::zeros());
    }

    #[test]
    fn test_quaternion_stays_normalized() {
        let mut body = body();
        let dt = 1.0 / 120.0;
        for step in 0..2000 {
            let mut loads = body.clear_forces();
            let t = step as f64 * dt;
            loads.apply_moment(&Vector3::new(
                3000.0 * (1.3 * t).sin(),
                -2000.0 * (0.7 * t).cos(),
                4000.0 * (2.1 * t).sin(),
            ));
            body.update_accelerations(loads);
            body.integrate(dt);
            let norm = body.orientation.quaternion().norm();
            assert!((norm - 1.0).abs() < 1e-9, "step {}: |q| = {}", step, norm);
        }
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut body = RigidBody::static_body();
        assert!(body.is_static());
        body.velocity = Vector3::new(1.0, 0.0, 0.0);
        let mut loads = body.clear_forces();
        loads.apply_force(&Vector3::new(1e6, 0.0, 0.0));
        body.update_accelerations(loads);
        body.integrate(1.0);
        assert_eq!(body.position, Vector3::zeros());
    }

    #[test]
    fn test_set_mass_keeps_inertia() {
        let mut body = body();
        let inertia = *body.inertia();
        body.set_mass(500.0);
        assert_eq!(body.inverse_mass(), 1.0 / 500.0);
        assert_eq!(*body.inertia(), inertia);
    }

    #[test]
    fn test_transform_tracks_pose() {
        let mut body = body();
        body.velocity = Vector3::new(10.0, 0.0, 0.0);
        let loads = body.clear_forces();
        body.update_accelerations(loads);
        body.integrate(1.0);
        let transform = body.transform();
        assert_relative_eq!(transform[(0, 3)], 10.0, epsilon = 1e-12);
        assert_relative_eq!(transform[(3, 3)], 1.0);
    }
}
