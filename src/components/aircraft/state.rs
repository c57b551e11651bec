use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::resources::AtmosphereProperties;

/// Air-relative quantities derived from the rigid-body state and the atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    /// True airspeed (m/s).
    pub true_airspeed: f64,
    /// Indicated airspeed, `TAS·sqrt(σ)` (m/s).
    pub indicated_airspeed: f64,
    pub mach: f64,
    /// Horizontal speed over the ground (m/s).
    pub ground_speed: f64,
    /// Rate of climb (m/s).
    pub vertical_speed: f64,
    /// Angle of attack (rad).
    pub alpha: f64,
    /// Sideslip angle (rad).
    pub beta: f64,
    /// Dynamic pressure (Pa).
    pub dynamic_pressure: f64,
}

impl Default for AirData {
    fn default() -> Self {
        Self {
            true_airspeed: 0.0,
            indicated_airspeed: 0.0,
            mach: 0.0,
            ground_speed: 0.0,
            vertical_speed: 0.0,
            alpha: 0.0,
            beta: 0.0,
            dynamic_pressure: 0.0,
        }
    }
}

/// Euler attitude in radians. Heading is clockwise from the world +X axis seen from above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
}

/// Published snapshot of the aircraft, rebuilt after every fixed step.
///
/// This is a projection of the rigid body and environment. Editing a copy has no effect on
/// the simulation.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Simulated time since the last reset (s).
    pub time: f64,
    /// World-frame position, +Y up (m).
    pub position: Vector3<f64>,
    /// World-frame velocity (m/s).
    pub velocity: Vector3<f64>,
    /// World-frame acceleration of the last step (m/s²).
    pub acceleration: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    /// Body-frame angular velocity (rad/s).
    pub angular_velocity: Vector3<f64>,
    /// Roll, pitch and yaw rates in the stability convention (rad/s).
    pub body_rates: Vector3<f64>,
    pub attitude: Attitude,
    /// Altitude above the world datum (m).
    pub altitude: f64,
    /// Height above the ground plane (m).
    pub altitude_agl: f64,
    pub atmosphere: AtmosphereProperties,
    /// World-frame wind at the aircraft (m/s).
    pub wind: Vector3<f64>,
    pub air_data: AirData,
    /// Total mass (kg).
    pub mass: f64,
    /// Mean throttle setting over all engines.
    pub throttle: f64,
    /// Remaining fuel (kg).
    pub fuel_mass: f64,
    /// Total fuel flow (kg/s).
    pub fuel_flow: f64,
    /// Body-frame load factors (specific force over g).
    pub load_factor: Vector3<f64>,
    pub on_ground: bool,
    pub stalled: bool,
}

impl Default for AircraftState {
    fn default() -> Self {
        Self {
            time: 0.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            body_rates: Vector3::zeros(),
            attitude: Attitude::default(),
            altitude: 0.0,
            altitude_agl: 0.0,
            atmosphere: AtmosphereProperties::default(),
            wind: Vector3::zeros(),
            air_data: AirData::default(),
            mass: 0.0,
            throttle: 0.0,
            fuel_mass: 0.0,
            fuel_flow: 0.0,
            load_factor: Vector3::new(0.0, 1.0, 0.0),
            on_ground: false,
            stalled: false,
        }
    }
}
