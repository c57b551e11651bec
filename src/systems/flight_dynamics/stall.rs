use nalgebra::Vector3;
use rand::Rng;

use crate::components::AircraftGeometry;
use crate::utils::moment_from_axes;

/// Recovering pitching moment coefficient per radian beyond the stall angle.
const PITCH_BREAK_PER_RAD: f64 = 0.5;
/// Chance per step of a wing drop, per radian beyond the stall angle, and its cap.
const WING_DROP_CHANCE_PER_RAD: f64 = 0.2;
const WING_DROP_MAX_CHANCE: f64 = 0.05;
/// Rolling moment coefficient of a wing drop.
const WING_DROP_ROLL_COEFFICIENT: f64 = 0.04;
/// Buffet force coefficient at full strength, reached 0.1 rad beyond the stall.
const BUFFET_FORCE_COEFFICIENT: f64 = 0.02;
const BUFFET_FULL_EXCESS: f64 = 0.1;

/// Disturbance loads of a stalled wing, body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StallPerturbation {
    pub force: Vector3<f64>,
    pub moment: Vector3<f64>,
}

/// Draws the stall disturbance for one step.
///
/// `excess` is how far `alpha` lies beyond the stall angle (rad). The pitch break pushes
/// `alpha` back toward zero: nose down in a positive stall, nose up in a negative one. It is
/// deterministic; the wing drop and buffet come from `rng`.
pub fn stall_perturbation<R: Rng>(
    rng: &mut R,
    alpha: f64,
    excess: f64,
    dynamic_pressure: f64,
    geometry: &AircraftGeometry,
) -> StallPerturbation {
    let excess = excess.max(0.0);
    let qs = dynamic_pressure * geometry.wing_area;

    let pitch = -alpha.signum() * PITCH_BREAK_PER_RAD * excess * qs * geometry.mac;

    let drop_chance = (WING_DROP_CHANCE_PER_RAD * excess).min(WING_DROP_MAX_CHANCE);
    let roll = if excess > 0.0 && rng.gen_bool(drop_chance) {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        side * WING_DROP_ROLL_COEFFICIENT * rng.gen_range(0.5..1.5) * qs * geometry.wing_span
    } else {
        0.0
    };

    let buffet = BUFFET_FORCE_COEFFICIENT * qs * (excess / BUFFET_FULL_EXCESS).min(1.0);
    let force = Vector3::new(
        0.0,
        buffet * rng.gen_range(-1.0..=1.0),
        buffet * rng.gen_range(-1.0..=1.0),
    );

    StallPerturbation {
        force,
        moment: moment_from_axes(roll, pitch, 0.0),
    }
}
