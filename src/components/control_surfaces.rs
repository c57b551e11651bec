use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Actuated control channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Aileron,
    Elevator,
    Rudder,
    Flaps,
    Spoilers,
    SpeedBrake,
    Gear,
}

impl Surface {
    /// Primary surfaces deflect both ways (-1..1), the rest travel 0..1.
    pub fn is_signed(&self) -> bool {
        matches!(self, Surface::Aileron | Surface::Elevator | Surface::Rudder)
    }
}

/// Axes with a trim input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimAxis {
    Aileron,
    Elevator,
    Rudder,
}

/// Partial pilot or autopilot command. `None` leaves the current target untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInputs {
    pub aileron: Option<f64>,
    pub elevator: Option<f64>,
    pub rudder: Option<f64>,
    pub flaps: Option<f64>,
    pub spoilers: Option<f64>,
    pub speed_brake: Option<f64>,
    pub gear_down: Option<bool>,
    /// Wheel brake pressure (0..1)
    pub brakes: Option<f64>,
}

/// Target and current position of one rate-limited actuator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceActuator {
    pub current: f64,
    pub target: f64,
    /// A failed surface stays where it is and ignores new targets.
    pub failed: bool,
}

impl SurfaceActuator {
    pub fn at(position: f64) -> Self {
        Self {
            current: position,
            target: position,
            failed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimState {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
}

/// Authority multipliers of the primary surfaces (0..1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlEffectiveness {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
}

impl Default for ControlEffectiveness {
    fn default() -> Self {
        Self {
            aileron: 1.0,
            elevator: 1.0,
            rudder: 1.0,
        }
    }
}

/// Full actuator state of the flight controls.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSurfaceState {
    pub aileron: SurfaceActuator,
    pub elevator: SurfaceActuator,
    pub rudder: SurfaceActuator,
    pub flaps: SurfaceActuator,
    pub spoilers: SurfaceActuator,
    pub speed_brake: SurfaceActuator,
    /// 0 is retracted, 1 is down and locked.
    pub gear: SurfaceActuator,
    pub trim: TrimState,
    pub effectiveness: ControlEffectiveness,
    pub brakes: f64,
}

impl Default for ControlSurfaceState {
    fn default() -> Self {
        Self {
            aileron: SurfaceActuator::default(),
            elevator: SurfaceActuator::default(),
            rudder: SurfaceActuator::default(),
            flaps: SurfaceActuator::default(),
            spoilers: SurfaceActuator::default(),
            speed_brake: SurfaceActuator::default(),
            gear: SurfaceActuator::at(1.0),
            trim: TrimState::default(),
            effectiveness: ControlEffectiveness::default(),
            brakes: 0.0,
        }
    }
}

impl ControlSurfaceState {
    pub fn actuator(&self, surface: Surface) -> &SurfaceActuator {
        match surface {
            Surface::Aileron => &self.aileron,
            Surface::Elevator => &self.elevator,
            Surface::Rudder => &self.rudder,
            Surface::Flaps => &self.flaps,
            Surface::Spoilers => &self.spoilers,
            Surface::SpeedBrake => &self.speed_brake,
            Surface::Gear => &self.gear,
        }
    }

    pub fn actuator_mut(&mut self, surface: Surface) -> &mut SurfaceActuator {
        match surface {
            Surface::Aileron => &mut self.aileron,
            Surface::Elevator => &mut self.elevator,
            Surface::Rudder => &mut self.rudder,
            Surface::Flaps => &mut self.flaps,
            Surface::Spoilers => &mut self.spoilers,
            Surface::SpeedBrake => &mut self.speed_brake,
            Surface::Gear => &mut self.gear,
        }
    }
}

/// Normalized deflections as seen by the aerodynamics: trim included and primary
/// surfaces scaled by their effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlDeflections {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub flaps: f64,
    pub spoilers: f64,
    pub speed_brake: f64,
    pub gear: f64,
}

/// Raw surface angles in degrees, for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAngles {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub flaps: f64,
    pub spoilers: f64,
    pub speed_brake: f64,
}
