use bevy::prelude::*;

use crate::components::{
    ControlDeflections, ControlEffectiveness, ControlInputs, ControlSurfaceConfig,
    ControlSurfaceState, Surface, SurfaceAngles, TrimAxis,
};
use crate::utils::move_towards;

/// Mach number above which control authority starts to fade.
const MACH_DERATE_ONSET: f64 = 0.8;
const MACH_DERATE_SLOPE: f64 = 1.5;
const MACH_DERATE_FLOOR: f64 = 0.4;
/// Gear positions within this distance of an end stop count as up or down.
const GEAR_POSITION_TOLERANCE: f64 = 1e-3;

/// Authority of the primary surfaces for an airspeed, stall speed and Mach number.
///
/// Falls off quadratically to 30% at half the stall speed, recovers linearly to full
/// authority at twice the stall speed and fades above Mach 0.8.
pub fn control_effectiveness(airspeed: f64, stall_speed: f64, mach: f64) -> f64 {
    let speed_factor = if stall_speed <= 0.0 {
        1.0
    } else {
        let ratio = (airspeed / stall_speed).max(0.0);
        if ratio < 0.5 {
            0.3 * (ratio / 0.5).powi(2)
        } else if ratio < 2.0 {
            0.3 + 0.7 * (ratio - 0.5) / 1.5
        } else {
            1.0
        }
    };

    let mach_factor = if mach > MACH_DERATE_ONSET {
        (1.0 - MACH_DERATE_SLOPE * (mach - MACH_DERATE_ONSET)).max(MACH_DERATE_FLOOR)
    } else {
        1.0
    };

    speed_factor * mach_factor
}

/// Rate-limited actuators for all flight control surfaces and the landing gear.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurfaceSystem {
    config: ControlSurfaceConfig,
    state: ControlSurfaceState,
}

impl ControlSurfaceSystem {
    pub fn new(config: ControlSurfaceConfig) -> Self {
        let mut system = Self {
            config,
            state: ControlSurfaceState::default(),
        };
        system.reset();
        system
    }

    /// Neutral surfaces, gear down, no trim and no failures.
    pub fn reset(&mut self) {
        self.state = ControlSurfaceState::default();
    }

    pub fn config(&self) -> &ControlSurfaceConfig {
        &self.config
    }

    /// Replaces limits and rates. Current positions are kept.
    pub fn set_config(&mut self, config: ControlSurfaceConfig) {
        self.config = config;
        if !self.config.retractable_gear {
            self.state.gear.target = 1.0;
        }
    }

    pub fn state(&self) -> &ControlSurfaceState {
        &self.state
    }

    /// Applies every channel present in `inputs`.
    pub fn set_inputs(&mut self, inputs: &ControlInputs) {
        let channels = [
            (Surface::Aileron, inputs.aileron),
            (Surface::Elevator, inputs.elevator),
            (Surface::Rudder, inputs.rudder),
            (Surface::Flaps, inputs.flaps),
            (Surface::Spoilers, inputs.spoilers),
            (Surface::SpeedBrake, inputs.speed_brake),
            (Surface::Gear, inputs.gear_down.map(|down| if down { 1.0 } else { 0.0 })),
        ];
        for (surface, value) in channels {
            if let Some(value) = value {
                self.set_target(surface, value);
            }
        }
        if let Some(brakes) = inputs.brakes {
            self.state.brakes = brakes.clamp(0.0, 1.0);
        }
    }

    /// Sets the target of one surface, clamped to its travel. Ignored for failed surfaces.
    pub fn set_target(&mut self, surface: Surface, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        let mut target = if surface.is_signed() {
            value.clamp(-1.0, 1.0)
        } else {
            value.clamp(0.0, 1.0)
        };

        match surface {
            Surface::Flaps => target = self.snap_flaps(target),
            Surface::Gear if !self.config.retractable_gear => target = 1.0,
            _ => {}
        }

        let actuator = self.state.actuator_mut(surface);
        if !actuator.failed {
            actuator.target = target;
        }
    }

    /// Nearest configured flap detent, as a normalized position.
    fn snap_flaps(&self, target: f64) -> f64 {
        let max_deflection = self.config.flap_max_deflection;
        if self.config.flap_detents.is_empty() || max_deflection <= 0.0 {
            return target;
        }
        let degrees = target * max_deflection;
        let nearest = self
            .config
            .flap_detents
            .iter()
            .copied()
            .min_by(|a, b| (a - degrees).abs().total_cmp(&(b - degrees).abs()))
            .unwrap_or(degrees);
        (nearest / max_deflection).clamp(0.0, 1.0)
    }

    pub fn set_trim(&mut self, axis: TrimAxis, value: f64) {
        let value = value.clamp(-1.0, 1.0);
        match axis {
            TrimAxis::Aileron => self.state.trim.aileron = value,
            TrimAxis::Elevator => self.state.trim.elevator = value,
            TrimAxis::Rudder => self.state.trim.rudder = value,
        }
    }

    /// Fails or restores a surface. A failed surface freezes where it currently is.
    pub fn set_failure(&mut self, surface: Surface, failed: bool) {
        let actuator = self.state.actuator_mut(surface);
        if failed && !actuator.failed {
            warn!("{:?} failed at {:.3}", surface, actuator.current);
            actuator.target = actuator.current;
        }
        actuator.failed = failed;
    }

    fn rate(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Aileron => self.config.aileron_rate,
            Surface::Elevator => self.config.elevator_rate,
            Surface::Rudder => self.config.rudder_rate,
            Surface::Flaps => self.config.flap_rate,
            Surface::Spoilers => self.config.spoiler_rate,
            Surface::SpeedBrake => self.config.speed_brake_rate,
            Surface::Gear => {
                if self.config.gear_cycle_time > 0.0 {
                    1.0 / self.config.gear_cycle_time
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// Moves every working surface toward its target by at most `rate · dt`.
    pub fn update(&mut self, dt: f64) {
        for surface in [
            Surface::Aileron,
            Surface::Elevator,
            Surface::Rudder,
            Surface::Flaps,
            Surface::Spoilers,
            Surface::SpeedBrake,
            Surface::Gear,
        ] {
            let max_step = self.rate(surface) * dt;
            let actuator = self.state.actuator_mut(surface);
            if !actuator.failed {
                actuator.current = move_towards(actuator.current, actuator.target, max_step);
            }
        }
    }

    pub fn update_effectiveness(&mut self, airspeed: f64, stall_speed: f64, mach: f64) {
        let effectiveness = control_effectiveness(airspeed, stall_speed, mach);
        self.state.effectiveness = ControlEffectiveness {
            aileron: effectiveness,
            elevator: effectiveness,
            rudder: effectiveness,
        };
    }

    /// Deflections for the aerodynamics: trim added, primary surfaces scaled by effectiveness.
    pub fn get_state(&self) -> ControlDeflections {
        let state = &self.state;
        let primary = |current: f64, trim: f64, effectiveness: f64| {
            (current + trim).clamp(-1.0, 1.0) * effectiveness
        };
        ControlDeflections {
            aileron: primary(
                state.aileron.current,
                state.trim.aileron,
                state.effectiveness.aileron,
            ),
            elevator: primary(
                state.elevator.current,
                state.trim.elevator,
                state.effectiveness.elevator,
            ),
            rudder: primary(
                state.rudder.current,
                state.trim.rudder,
                state.effectiveness.rudder,
            ),
            flaps: state.flaps.current,
            spoilers: state.spoilers.current,
            speed_brake: state.speed_brake.current,
            gear: state.gear.current,
        }
    }

    /// Raw surface angles in degrees.
    pub fn get_angles(&self) -> SurfaceAngles {
        let state = &self.state;
        let config = &self.config;
        SurfaceAngles {
            aileron: state.aileron.current * config.aileron_max_deflection,
            elevator: state.elevator.current * config.elevator_max_deflection,
            rudder: state.rudder.current * config.rudder_max_deflection,
            flaps: state.flaps.current * config.flap_max_deflection,
            spoilers: state.spoilers.current * config.spoiler_max_deflection,
            speed_brake: state.speed_brake.current * config.speed_brake_max_deflection,
        }
    }

    pub fn brakes(&self) -> f64 {
        self.state.brakes
    }

    pub fn gear_is_down(&self) -> bool {
        self.state.gear.current >= 1.0 - GEAR_POSITION_TOLERANCE
    }

    pub fn gear_is_up(&self) -> bool {
        self.state.gear.current <= GEAR_POSITION_TOLERANCE
    }

    pub fn gear_in_transit(&self) -> bool {
        !self.gear_is_down() && !self.gear_is_up()
    }
}
