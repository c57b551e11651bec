use serde::{Deserialize, Serialize};

/// Limits and actuator rates of the flight controls.
///
/// Deflection limits are in degrees and only matter for display and flap detent mapping;
/// rates are in normalized units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSurfaceConfig {
    pub aileron_max_deflection: f64,
    pub elevator_max_deflection: f64,
    pub rudder_max_deflection: f64,
    pub flap_max_deflection: f64,
    pub spoiler_max_deflection: f64,
    pub speed_brake_max_deflection: f64,

    pub aileron_rate: f64,
    pub elevator_rate: f64,
    pub rudder_rate: f64,
    pub flap_rate: f64,
    pub spoiler_rate: f64,
    pub speed_brake_rate: f64,

    /// Discrete flap positions (deg). Empty means continuous flaps.
    pub flap_detents: Vec<f64>,
    /// Time for a full gear extension or retraction (s)
    pub gear_cycle_time: f64,
    /// Fixed gear never leaves the down position.
    pub retractable_gear: bool,
}

impl Default for ControlSurfaceConfig {
    fn default() -> Self {
        Self {
            aileron_max_deflection: 20.0,
            elevator_max_deflection: 25.0,
            rudder_max_deflection: 20.0,
            flap_max_deflection: 30.0,
            spoiler_max_deflection: 60.0,
            speed_brake_max_deflection: 60.0,
            aileron_rate: 2.0,
            elevator_rate: 2.0,
            rudder_rate: 2.0,
            flap_rate: 0.2,
            spoiler_rate: 1.0,
            speed_brake_rate: 0.5,
            flap_detents: Vec::new(),
            gear_cycle_time: 6.0,
            retractable_gear: true,
        }
    }
}

impl ControlSurfaceConfig {
    pub fn cessna_172() -> Self {
        Self {
            aileron_max_deflection: 20.0,
            elevator_max_deflection: 28.0,
            rudder_max_deflection: 16.0,
            flap_max_deflection: 30.0,
            flap_detents: vec![0.0, 10.0, 20.0, 30.0],
            retractable_gear: false,
            ..Default::default()
        }
    }

    pub fn light_jet() -> Self {
        Self {
            flap_max_deflection: 35.0,
            flap_detents: vec![0.0, 15.0, 35.0],
            gear_cycle_time: 8.0,
            ..Default::default()
        }
    }
}
