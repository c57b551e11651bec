use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Mass bounds, centre of gravity and inertia of an aircraft.
///
/// Inertias use the conventional aircraft axes: `ixx` roll, `iyy` pitch, `izz` yaw and the
/// roll/yaw product `ixz`. [`MassModel::inertia`] maps them onto the body frame used by the
/// integrator (+X forward, +Y up, +Z right wing).
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassModel {
    /// Mass with no usable fuel (kg).
    pub empty_mass: f64,
    /// Usable fuel capacity (kg).
    pub max_fuel_mass: f64,
    /// Structural limit on total mass (kg).
    pub max_takeoff_mass: f64,
    /// Centre of gravity offset from the body origin, body frame (m).
    pub cg_offset: Vector3<f64>,
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    pub ixz: f64,
}

impl MassModel {
    /// Total mass for a given fuel load, capped at the maximum takeoff mass.
    pub fn total_mass(&self, fuel_mass: f64) -> f64 {
        (self.empty_mass + fuel_mass.clamp(0.0, self.max_fuel_mass)).min(self.max_takeoff_mass)
    }

    /// Inertia tensor in body axes.
    pub fn inertia(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.ixx, self.ixz, 0.0, //
            self.ixz, self.izz, 0.0, //
            0.0, 0.0, self.iyy,
        )
    }

    /// Inverse of [`MassModel::inertia`]. Falls back to zero (no rotational response)
    /// when the tensor is singular.
    pub fn inertia_inv(&self) -> Matrix3<f64> {
        self.inertia().try_inverse().unwrap_or_else(|| {
            error!("Inertia matrix is uninvertible, defaulting to zero matrix.");
            Matrix3::zeros()
        })
    }

    pub fn cessna_172() -> Self {
        Self {
            empty_mass: 767.0,
            max_fuel_mass: 144.0,
            max_takeoff_mass: 1111.0,
            cg_offset: Vector3::zeros(),
            ixx: 1285.3,
            iyy: 1824.9,
            izz: 2666.9,
            ixz: 0.0,
        }
    }

    pub fn light_jet() -> Self {
        Self {
            empty_mass: 4600.0,
            max_fuel_mass: 2200.0,
            max_takeoff_mass: 7250.0,
            cg_offset: Vector3::new(0.1, 0.0, 0.0),
            ixx: 15000.0,
            iyy: 31000.0,
            izz: 43000.0,
            ixz: 500.0,
        }
    }
}
