use serde::{Deserialize, Serialize};

use super::engine::FlightConditions;
use crate::components::JetConfig;
use crate::resources::Atmosphere;
use crate::utils::{first_order_lag, ISA_SEA_LEVEL_DENSITY, ISA_SEA_LEVEL_TEMP, ISA_TROPOPAUSE_ALTITUDE};

/// N2 below which the engine counts as spun down and may be started (%).
pub const JET_START_N2_THRESHOLD: f64 = 5.0;
const ZERO_CELSIUS: f64 = 273.15;

/// Two-spool turbofan with first-order spool and exhaust temperature dynamics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetEngine {
    config: JetConfig,
    pub throttle: f64,
    pub running: bool,
    /// Low pressure spool speed (%)
    pub n1: f64,
    /// High pressure spool speed (%)
    pub n2: f64,
    /// Exhaust gas temperature (°C)
    pub egt: f64,
    pub thrust: f64,
    pub fuel_flow: f64,
}

impl JetEngine {
    pub fn new(config: JetConfig) -> Self {
        Self {
            config,
            throttle: 0.0,
            running: false,
            n1: 0.0,
            n2: 0.0,
            egt: ISA_SEA_LEVEL_TEMP - ZERO_CELSIUS,
            thrust: 0.0,
            fuel_flow: 0.0,
        }
    }

    pub fn config(&self) -> &JetConfig {
        &self.config
    }

    pub fn bypass_ratio(&self) -> f64 {
        self.config.bypass_ratio
    }

    pub fn tsfc(&self) -> f64 {
        self.config.tsfc
    }

    /// Normalized N1 between idle (0) and maximum (1).
    pub fn n1_normalized(&self) -> f64 {
        let range = self.config.n1_max - self.config.n1_idle;
        ((self.n1 - self.config.n1_idle) / range).clamp(0.0, 1.0)
    }

    /// Advances spool speeds and EGT, then recomputes thrust and fuel flow.
    pub fn update(&mut self, dt: f64, conditions: &FlightConditions) {
        let config = &self.config;
        let tau = config.spool_time_constant;
        let ambient_celsius = conditions.atmosphere.temperature - ZERO_CELSIUS;

        let target_n1 = if self.running {
            config.n1_idle + self.throttle * (config.n1_max - config.n1_idle)
        } else {
            0.0
        };
        self.n1 = first_order_lag(self.n1, target_n1, tau, dt);
        self.n2 = first_order_lag(self.n2, self.n1 * config.n2_ratio, 0.5 * tau, dt);

        let target_egt = if self.running {
            config.egt_idle + (config.egt_max - config.egt_idle) * self.n1_normalized()
        } else {
            ambient_celsius
        };
        self.egt = first_order_lag(self.egt, target_egt, 3.0 * tau, dt);

        self.thrust = self.calculate_thrust(conditions);
        self.fuel_flow = self.calculate_fuel_flow(self.thrust, conditions);
    }

    /// Net thrust (N). Exactly zero while the engine is not running.
    pub fn calculate_thrust(&self, conditions: &FlightConditions) -> f64 {
        if !self.running {
            return 0.0;
        }
        let config = &self.config;
        let atmosphere = &conditions.atmosphere;

        let n1 = self.n1_normalized();
        let spool_fraction =
            config.idle_thrust_fraction + (1.0 - config.idle_thrust_fraction) * n1 * n1;

        let density_ratio = atmosphere.density / ISA_SEA_LEVEL_DENSITY;
        let mach = conditions.mach();
        let ram = 1.0 + 0.2 * mach * mach;
        let temperature_correction = (ISA_SEA_LEVEL_TEMP / atmosphere.temperature).sqrt();
        let lapse = if conditions.altitude > ISA_TROPOPAUSE_ALTITUDE {
            let (_, tropopause_pressure) =
                Atmosphere::standard_temperature_pressure(ISA_TROPOPAUSE_ALTITUDE);
            (atmosphere.pressure / tropopause_pressure).clamp(0.0, 1.0).powf(0.2)
        } else {
            1.0
        };

        (config.max_thrust * spool_fraction * density_ratio * ram * temperature_correction * lapse)
            .max(0.0)
    }

    /// Fuel flow (kg/s) for a thrust level, with the idle inefficiency below 30% thrust.
    pub fn calculate_fuel_flow(&self, thrust: f64, conditions: &FlightConditions) -> f64 {
        if !self.running || thrust <= 0.0 {
            return 0.0;
        }
        let thrust_fraction = (thrust / self.config.max_thrust).max(0.0);
        let altitude_factor = (conditions.atmosphere.temperature / ISA_SEA_LEVEL_TEMP).sqrt();
        let idle_multiplier = if thrust_fraction < 0.3 {
            let deficit = (0.3 - thrust_fraction) / 0.3;
            1.0 + 4.0 * deficit * deficit
        } else {
            1.0
        };
        thrust * self.config.tsfc * altitude_factor * idle_multiplier
    }

    /// Lights the engine. Only possible once the core has spun down.
    pub fn start(&mut self) -> bool {
        if self.running || self.n2 >= JET_START_N2_THRESHOLD {
            return false;
        }
        self.running = true;
        self.n1 = self.config.n1_idle;
        self.n2 = self.config.n1_idle * self.config.n2_ratio;
        true
    }

    pub fn shutdown(&mut self) {
        self.running = false;
        self.throttle = 0.0;
    }
}
