use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::deg_to_rad;

/// Full set of aerodynamic coefficients, grouped per force and moment axis.
///
/// Control-surface terms are per unit of normalized deflection (-1..1 for primary surfaces,
/// 0..1 for flaps, spoilers, speed brake and gear). Angles are radians.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftAeroCoefficients {
    pub lift: LiftCoefficients,
    pub stall: StallCoefficients,
    pub drag: DragCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
}

/// Lift coefficients for the linear region
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftCoefficients {
    /// Lift coefficient at zero angle of attack.
    pub c_l_0: f64,
    /// Lift curve slope (per radian).
    pub c_l_alpha: f64,
    /// Maximum lift coefficient (clean wing).
    pub c_l_max: f64,
    /// Lift increment at full flaps.
    pub c_l_flap: f64,
    /// Lift contribution of the elevator.
    pub c_l_deltae: f64,
    /// Lift change at fully deployed spoilers (usually negative).
    pub c_l_spoiler: f64,
}

/// Shape of the three-region stall model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StallCoefficients {
    /// Angle of attack where the linear lift curve ends (rad).
    pub alpha_stall: f64,
    /// Width of the blend band past the stall angle (rad).
    pub stall_transition: f64,
    /// Fraction of `c_l_max` reached at the end of the blend band.
    pub peak_retention: f64,
    /// Fraction of `c_l_max` the deep-stall lift decays toward.
    pub post_stall_floor: f64,
    /// Exponential decay rate beyond the blend band (per radian).
    pub decay_rate: f64,
}

impl Default for StallCoefficients {
    fn default() -> Self {
        Self {
            alpha_stall: deg_to_rad(15.0),
            stall_transition: deg_to_rad(3.0),
            peak_retention: 0.75,
            post_stall_floor: 0.45,
            decay_rate: 4.0,
        }
    }
}

/// Drag build-up coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragCoefficients {
    /// Parasitic drag coefficient.
    pub c_d_0: f64,
    /// Oswald span efficiency for induced drag.
    pub oswald_efficiency: f64,
    /// Drag growth with angle of attack squared (per rad²).
    pub c_d_alpha2: f64,
    pub c_d_flap: f64,
    pub c_d_deltae: f64,
    pub c_d_deltaa: f64,
    pub c_d_spoiler: f64,
    pub c_d_speed_brake: f64,
    pub c_d_gear: f64,
}

/// Side force coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideForceCoefficients {
    pub c_y_beta: f64,
    pub c_y_deltar: f64,
}

/// Rolling moment coefficients (positive rolls the right wing down)
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollCoefficients {
    /// Dihedral effect.
    pub c_l_beta: f64,
    /// Roll damping.
    pub c_l_p: f64,
    pub c_l_r: f64,
    pub c_l_deltaa: f64,
    pub c_l_deltar: f64,
}

/// Pitching moment coefficients (positive is nose up)
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchCoefficients {
    pub c_m_0: f64,
    pub c_m_alpha: f64,
    /// Pitch damping.
    pub c_m_q: f64,
    pub c_m_deltae: f64,
    pub c_m_flap: f64,
}

/// Yawing moment coefficients (positive is nose right)
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YawCoefficients {
    /// Weathercock stability.
    pub c_n_beta: f64,
    pub c_n_p: f64,
    /// Yaw damping.
    pub c_n_r: f64,
    pub c_n_deltaa: f64,
    pub c_n_deltar: f64,
}

/// Induced drag reduction close to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundEffectConfig {
    /// Height above ground below which ground effect applies (m). `None` uses the wing span.
    pub reference_height: Option<f64>,
    /// Largest fraction of induced drag removed at zero height.
    pub max_reduction: f64,
}

impl Default for GroundEffectConfig {
    fn default() -> Self {
        Self {
            reference_height: None,
            max_reduction: 0.5,
        }
    }
}

impl AircraftAeroCoefficients {
    pub fn cessna_172() -> Self {
        Self {
            lift: LiftCoefficients {
                c_l_0: 0.31,
                c_l_alpha: 5.143,
                c_l_max: 1.6,
                c_l_flap: 0.9,
                c_l_deltae: 0.1,
                c_l_spoiler: 0.0,
            },
            stall: StallCoefficients::default(),
            drag: DragCoefficients {
                c_d_0: 0.027,
                oswald_efficiency: 0.75,
                c_d_alpha2: 0.3,
                c_d_flap: 0.045,
                c_d_deltae: 0.01,
                c_d_deltaa: 0.005,
                c_d_spoiler: 0.0,
                c_d_speed_brake: 0.0,
                c_d_gear: 0.012,
            },
            side_force: SideForceCoefficients {
                c_y_beta: -0.31,
                c_y_deltar: -0.187,
            },
            roll: RollCoefficients {
                c_l_beta: -0.089,
                c_l_p: -0.47,
                c_l_r: 0.096,
                c_l_deltaa: 0.178,
                c_l_deltar: -0.0147,
            },
            pitch: PitchCoefficients {
                c_m_0: 0.04,
                c_m_alpha: -0.89,
                c_m_q: -12.4,
                c_m_deltae: 1.28,
                c_m_flap: -0.08,
            },
            yaw: YawCoefficients {
                c_n_beta: 0.065,
                c_n_p: -0.03,
                c_n_r: -0.099,
                c_n_deltaa: -0.0053,
                c_n_deltar: 0.0657,
            },
        }
    }

    pub fn light_jet() -> Self {
        Self {
            lift: LiftCoefficients {
                c_l_0: 0.2,
                c_l_alpha: 5.5,
                c_l_max: 1.4,
                c_l_flap: 0.8,
                c_l_deltae: 0.12,
                c_l_spoiler: -0.4,
            },
            stall: StallCoefficients {
                alpha_stall: deg_to_rad(13.0),
                stall_transition: deg_to_rad(2.5),
                ..Default::default()
            },
            drag: DragCoefficients {
                c_d_0: 0.022,
                oswald_efficiency: 0.8,
                c_d_alpha2: 0.25,
                c_d_flap: 0.05,
                c_d_deltae: 0.01,
                c_d_deltaa: 0.004,
                c_d_spoiler: 0.06,
                c_d_speed_brake: 0.04,
                c_d_gear: 0.02,
            },
            side_force: SideForceCoefficients {
                c_y_beta: -0.6,
                c_y_deltar: -0.15,
            },
            roll: RollCoefficients {
                c_l_beta: -0.1,
                c_l_p: -0.45,
                c_l_r: 0.1,
                c_l_deltaa: 0.12,
                c_l_deltar: -0.01,
            },
            pitch: PitchCoefficients {
                c_m_0: 0.03,
                c_m_alpha: -1.1,
                c_m_q: -15.0,
                c_m_deltae: 1.2,
                c_m_flap: -0.1,
            },
            yaw: YawCoefficients {
                c_n_beta: 0.12,
                c_n_p: -0.02,
                c_n_r: -0.15,
                c_n_deltaa: -0.004,
                c_n_deltar: 0.07,
            },
        }
    }
}
