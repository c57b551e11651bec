use serde::{Deserialize, Serialize};

/// Friction and steering parameters for the flat-ground contact model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundHandlingConfig {
    /// Rolling friction coefficient on the wheels
    pub rolling_friction: f64,
    /// Friction coefficient with full wheel brakes
    pub braking_friction: f64,
    /// Friction coefficient sliding on the fuselage (gear not down)
    pub belly_friction: f64,
    /// Sideways tyre friction coefficient
    pub lateral_friction: f64,
    /// Exponential decay rate of the angular velocity while on the ground (1/s)
    pub angular_damping: f64,
    /// Nose-wheel yaw moment at full rudder (N·m)
    pub steering_moment: f64,
    /// Ground speed at which steering reaches full authority (m/s)
    pub steering_speed: f64,
    /// Distance of the main wheels behind the centre of gravity (m)
    pub main_gear_arm: f64,
    /// Nose-up pitch at which the tail meets the runway (rad)
    pub max_ground_pitch: f64,
}

impl Default for GroundHandlingConfig {
    fn default() -> Self {
        Self {
            rolling_friction: 0.02,
            braking_friction: 0.5,
            belly_friction: 0.4,
            lateral_friction: 0.8,
            angular_damping: 5.0,
            steering_moment: 3000.0,
            steering_speed: 5.0,
            main_gear_arm: 0.3,
            max_ground_pitch: 0.21,
        }
    }
}

impl GroundHandlingConfig {
    /// Longitudinal friction coefficient for the given brake setting and gear state.
    pub fn friction_coefficient(&self, brakes: f64, gear_down: bool) -> f64 {
        if gear_down {
            let brakes = brakes.clamp(0.0, 1.0);
            self.rolling_friction + (self.braking_friction - self.rolling_friction) * brakes
        } else {
            self.belly_friction
        }
    }
}
