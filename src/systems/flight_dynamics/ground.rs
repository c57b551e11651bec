use nalgebra::Vector3;

use crate::components::GroundHandlingConfig;
use crate::systems::physics::RigidBody;
use crate::utils::{euler_orientation, moment_from_axes, orientation_to_euler};

/// Loads from the flat ground for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundReaction {
    /// Normal plus friction force, world frame (N)
    pub force: Vector3<f64>,
    /// Nose-wheel steering and main-gear pitch moment, body frame (N·m)
    pub moment: Vector3<f64>,
}

/// Wheel or belly state for the ground contact model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactState {
    pub brakes: f64,
    pub gear_down: bool,
    /// Raw rudder position driving the nose wheel (-1..1)
    pub rudder: f64,
}

/// Snaps the body onto the ground plane: no penetration and no sinking.
pub fn clamp_to_ground(body: &mut RigidBody, ground_level: f64) {
    if body.position.y < ground_level {
        body.position.y = ground_level;
    }
    if body.velocity.y < 0.0 {
        body.velocity.y = 0.0;
    }
}

/// Exponentially damps the angular velocity while rolling.
pub fn damp_angular_velocity(body: &mut RigidBody, damping: f64, dt: f64) {
    body.angular_velocity *= (-damping.max(0.0) * dt).exp();
}

/// Normal force, Coulomb friction and steering for a body resting on the ground.
///
/// `applied_force` is the world-frame sum of every other load this step. The normal force
/// cancels its downward part. Along and across the heading, friction opposes the motion (or
/// the push when at rest) and never exceeds `μ·N`, so it cannot reverse the velocity.
/// On the wheels the normal force acts at the main gear, behind the centre of gravity, and
/// pitches the nose down until the nose wheel takes the load.
pub fn ground_reaction(
    body: &RigidBody,
    applied_force: &Vector3<f64>,
    handling: &GroundHandlingConfig,
    contact: &ContactState,
    dt: f64,
) -> GroundReaction {
    let normal = (-applied_force.y).max(0.0);

    let nose = body.body_to_world(&Vector3::x());
    let forward = Vector3::new(nose.x, 0.0, nose.z)
        .try_normalize(1e-9)
        .unwrap_or_else(Vector3::x);
    let lateral = forward.cross(&Vector3::y());

    let mass = body.mass();
    let longitudinal_mu = handling.friction_coefficient(contact.brakes, contact.gear_down);
    let lateral_mu = if contact.gear_down {
        handling.lateral_friction
    } else {
        handling.belly_friction
    };

    let coulomb = |velocity: f64, push: f64, mu: f64| {
        let limit = mu * normal;
        let stopping = -(mass * velocity / dt + push);
        stopping.clamp(-limit, limit)
    };

    let longitudinal = coulomb(
        body.velocity.dot(&forward),
        applied_force.dot(&forward),
        longitudinal_mu,
    );
    let sideways = coulomb(
        body.velocity.dot(&lateral),
        applied_force.dot(&lateral),
        lateral_mu,
    );

    let moment = if contact.gear_down {
        let steering = if handling.steering_speed > 0.0 {
            let ground_speed = Vector3::new(body.velocity.x, 0.0, body.velocity.z).norm();
            let authority = (ground_speed / handling.steering_speed).min(1.0);
            contact.rudder.clamp(-1.0, 1.0) * handling.steering_moment * authority
        } else {
            0.0
        };
        moment_from_axes(0.0, -normal * handling.main_gear_arm, steering)
    } else {
        Vector3::zeros()
    };

    GroundReaction {
        force: Vector3::y() * normal + forward * longitudinal + lateral * sideways,
        moment,
    }
}

/// Holds the body on the ground after integration.
///
/// Puts it at the exact ground height with no vertical motion and wings level on the gear.
/// Pitch stays free between the nose wheel (zero) and the tail striking the runway
/// (`max_pitch`); a pitch rate pushing past either stop is removed.
pub fn apply_ground_constraint(body: &mut RigidBody, ground_level: f64, max_pitch: f64) {
    body.position.y = ground_level;
    body.velocity.y = 0.0;

    let euler = orientation_to_euler(&body.orientation);
    let pitch = euler.y.clamp(0.0, max_pitch.max(0.0));
    body.orientation = euler_orientation(0.0, pitch, euler.z);

    body.angular_velocity.x = 0.0;
    let pitch_rate = body.angular_velocity.z;
    if (pitch <= 0.0 && pitch_rate < 0.0) || (pitch >= max_pitch && pitch_rate > 0.0) {
        body.angular_velocity.z = 0.0;
    }
    body.rebuild_transform();
}
