use serde::{Deserialize, Serialize};

use super::engine::FlightConditions;
use crate::components::PistonConfig;
use crate::utils::{first_order_lag, ISA_SEA_LEVEL_DENSITY, ISA_SEA_LEVEL_PRESSURE, ISA_SEA_LEVEL_TEMP};

/// RPM below which the engine counts as stopped and may be started.
pub const PISTON_START_RPM_THRESHOLD: f64 = 100.0;
/// Highest throttle setting a start is attempted with.
pub const PISTON_START_MAX_THROTTLE: f64 = 0.2;
/// Leanest mixture a start is attempted with.
pub const PISTON_START_MIN_MIXTURE: f64 = 0.8;
/// Below this airspeed thrust blends toward the static estimate (m/s).
const STATIC_THRUST_BLEND_SPEED: f64 = 10.0;
const ZERO_CELSIUS: f64 = 273.15;

/// Normally aspirated piston engine with a fixed-pitch propeller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PistonEngine {
    config: PistonConfig,
    pub throttle: f64,
    pub mixture: f64,
    pub running: bool,
    pub rpm: f64,
    /// Manifold pressure (Pa)
    pub manifold_pressure: f64,
    /// Cylinder head temperature (°C)
    pub cht: f64,
    /// Oil temperature (°C)
    pub oil_temperature: f64,
    /// Oil pressure (psi)
    pub oil_pressure: f64,
    pub thrust: f64,
    pub fuel_flow: f64,
}

impl PistonEngine {
    pub fn new(config: PistonConfig) -> Self {
        let ambient = ISA_SEA_LEVEL_TEMP - ZERO_CELSIUS;
        Self {
            config,
            throttle: 0.0,
            mixture: 1.0,
            running: false,
            rpm: 0.0,
            manifold_pressure: ISA_SEA_LEVEL_PRESSURE,
            cht: ambient,
            oil_temperature: ambient,
            oil_pressure: 0.0,
            thrust: 0.0,
            fuel_flow: 0.0,
        }
    }

    pub fn config(&self) -> &PistonConfig {
        &self.config
    }

    pub fn rpm_fraction(&self) -> f64 {
        (self.rpm / self.config.max_rpm).clamp(0.0, 1.0)
    }

    /// Fraction of rated power the engine is making at this density.
    pub fn power_setting(&self, conditions: &FlightConditions) -> f64 {
        if !self.running {
            return 0.0;
        }
        let density_ratio = conditions.atmosphere.density / ISA_SEA_LEVEL_DENSITY;
        (density_ratio * self.rpm_fraction()).max(0.0)
    }

    /// Advances RPM, manifold pressure and temperatures, then recomputes thrust and fuel flow.
    pub fn update(&mut self, dt: f64, conditions: &FlightConditions) {
        let ambient_pressure = conditions.atmosphere.pressure;
        let ambient_celsius = conditions.atmosphere.temperature - ZERO_CELSIUS;

        self.manifold_pressure = if self.running {
            ambient_pressure * (0.3 + 0.7 * self.throttle)
        } else {
            ambient_pressure
        };

        let target_rpm = if self.running {
            let pressure_ratio = (self.manifold_pressure / ISA_SEA_LEVEL_PRESSURE).clamp(0.0, 1.0);
            self.config.idle_rpm
                + (self.config.max_rpm - self.config.idle_rpm) * self.throttle * pressure_ratio
        } else {
            0.0
        };
        self.rpm = first_order_lag(self.rpm, target_rpm, self.config.rpm_time_constant, dt);

        let power = self.power_setting(conditions);
        let airspeed = conditions.airspeed.max(0.0);

        let cht_rise = if self.running { 40.0 + 160.0 * power } else { 0.0 };
        let target_cht = ambient_celsius + cht_rise / (1.0 + airspeed / 60.0);
        self.cht = first_order_lag(self.cht, target_cht, self.config.cht_time_constant, dt);

        let oil_rise = if self.running { 30.0 + 70.0 * power } else { 0.0 };
        let target_oil = ambient_celsius + oil_rise / (1.0 + airspeed / 120.0);
        self.oil_temperature =
            first_order_lag(self.oil_temperature, target_oil, self.config.oil_time_constant, dt);

        self.oil_pressure = self.calculate_oil_pressure();
        self.thrust = self.calculate_thrust(conditions);
        self.fuel_flow = self.calculate_fuel_flow(conditions);
    }

    /// Oil pressure (psi): rises with RPM, thins out as the oil heats up.
    pub fn calculate_oil_pressure(&self) -> f64 {
        if self.rpm < self.config.min_oil_pressure_rpm {
            return 0.0;
        }
        let viscosity = (1.0 - (self.oil_temperature - 80.0) / 300.0).clamp(0.7, 1.2);
        (20.0 + 60.0 * self.rpm_fraction()) * viscosity
    }

    /// Propeller efficiency for an advance ratio.
    pub fn propeller_efficiency(&self, advance_ratio: f64) -> f64 {
        let ratio = advance_ratio / self.config.optimal_advance_ratio;
        (self.config.prop_efficiency * ratio * (2.0 - ratio)).max(0.0)
    }

    /// Propeller thrust (N). Exactly zero while the engine is not running.
    pub fn calculate_thrust(&self, conditions: &FlightConditions) -> f64 {
        if !self.running {
            return 0.0;
        }
        let power = self.config.max_power * self.power_setting(conditions);
        let static_thrust = power * self.config.static_thrust_per_watt;
        let airspeed = conditions.airspeed.max(0.0);
        let revolutions = self.rpm / 60.0;

        if revolutions <= 0.0 || airspeed <= 1e-3 {
            return static_thrust;
        }

        let advance_ratio = airspeed / (revolutions * self.config.prop_diameter);
        let dynamic_thrust = power * self.propeller_efficiency(advance_ratio) / airspeed;

        if airspeed < STATIC_THRUST_BLEND_SPEED {
            let blend = airspeed / STATIC_THRUST_BLEND_SPEED;
            static_thrust + (dynamic_thrust - static_thrust) * blend
        } else {
            dynamic_thrust
        }
    }

    /// Fuel flow (kg/s) for the current power setting and mixture.
    pub fn calculate_fuel_flow(&self, conditions: &FlightConditions) -> f64 {
        if !self.running {
            return 0.0;
        }
        let mixture_factor = 0.6 + 0.6 * self.mixture.clamp(0.0, 1.0);
        self.config.bsfc * self.config.max_power * self.power_setting(conditions) * mixture_factor
    }

    /// Starts the engine from rest with the throttle closed and a rich mixture.
    pub fn start(&mut self) -> bool {
        if self.running
            || self.rpm >= PISTON_START_RPM_THRESHOLD
            || self.throttle >= PISTON_START_MAX_THROTTLE
            || self.mixture <= PISTON_START_MIN_MIXTURE
        {
            return false;
        }
        self.running = true;
        self.rpm = self.config.idle_rpm;
        true
    }

    /// Cuts the engine by leaning the mixture to idle cut-off.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.mixture = 0.0;
    }
}
