use serde::{Deserialize, Serialize};

use super::jet::JetEngine;
use super::piston::PistonEngine;
use crate::components::{EngineConfig, EngineReadout, EngineStatus, EngineType};
use crate::resources::AtmosphereProperties;

/// Ambient conditions an engine runs in during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightConditions {
    pub atmosphere: AtmosphereProperties,
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Altitude above the datum (m)
    pub altitude: f64,
}

impl FlightConditions {
    pub fn new(atmosphere: AtmosphereProperties, airspeed: f64, altitude: f64) -> Self {
        Self {
            atmosphere,
            airspeed,
            altitude,
        }
    }

    pub fn mach(&self) -> f64 {
        if self.atmosphere.speed_of_sound > 0.0 {
            self.airspeed.max(0.0) / self.atmosphere.speed_of_sound
        } else {
            0.0
        }
    }
}

/// One engine of either kind. The variant fixes the kind for the engine's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Engine {
    Jet(JetEngine),
    Piston(PistonEngine),
}

impl Engine {
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.kind {
            EngineType::Jet(jet) => Engine::Jet(JetEngine::new(jet)),
            EngineType::Piston(piston) => Engine::Piston(PistonEngine::new(piston)),
        }
    }

    pub fn update(&mut self, dt: f64, conditions: &FlightConditions) {
        match self {
            Engine::Jet(engine) => engine.update(dt, conditions),
            Engine::Piston(engine) => engine.update(dt, conditions),
        }
    }

    pub fn calculate_thrust(&self, conditions: &FlightConditions) -> f64 {
        match self {
            Engine::Jet(engine) => engine.calculate_thrust(conditions),
            Engine::Piston(engine) => engine.calculate_thrust(conditions),
        }
    }

    pub fn calculate_fuel_flow(&self, conditions: &FlightConditions) -> f64 {
        match self {
            Engine::Jet(engine) => {
                engine.calculate_fuel_flow(engine.calculate_thrust(conditions), conditions)
            }
            Engine::Piston(engine) => engine.calculate_fuel_flow(conditions),
        }
    }

    pub fn start(&mut self) -> bool {
        match self {
            Engine::Jet(engine) => engine.start(),
            Engine::Piston(engine) => engine.start(),
        }
    }

    pub fn shutdown(&mut self) {
        match self {
            Engine::Jet(engine) => engine.shutdown(),
            Engine::Piston(engine) => engine.shutdown(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Engine::Jet(engine) => engine.running,
            Engine::Piston(engine) => engine.running,
        }
    }

    pub fn throttle(&self) -> f64 {
        match self {
            Engine::Jet(engine) => engine.throttle,
            Engine::Piston(engine) => engine.throttle,
        }
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        let throttle = throttle.clamp(0.0, 1.0);
        match self {
            Engine::Jet(engine) => engine.throttle = throttle,
            Engine::Piston(engine) => engine.throttle = throttle,
        }
    }

    /// Sets the mixture of a piston engine. Jets have no mixture control.
    pub fn set_mixture(&mut self, mixture: f64) {
        if let Engine::Piston(engine) = self {
            engine.mixture = mixture.clamp(0.0, 1.0);
        }
    }

    /// Thrust of the last update (N).
    pub fn thrust(&self) -> f64 {
        match self {
            Engine::Jet(engine) => engine.thrust,
            Engine::Piston(engine) => engine.thrust,
        }
    }

    /// Fuel flow of the last update (kg/s).
    pub fn fuel_flow(&self) -> f64 {
        match self {
            Engine::Jet(engine) => engine.fuel_flow,
            Engine::Piston(engine) => engine.fuel_flow,
        }
    }

    pub fn status(&self, name: &str) -> EngineStatus {
        let readout = match self {
            Engine::Jet(engine) => EngineReadout::Jet {
                n1: engine.n1,
                n2: engine.n2,
                egt: engine.egt,
            },
            Engine::Piston(engine) => EngineReadout::Piston {
                rpm: engine.rpm,
                manifold_pressure: engine.manifold_pressure,
                cht: engine.cht,
                oil_temperature: engine.oil_temperature,
                oil_pressure: engine.oil_pressure,
                mixture: engine.mixture,
            },
        };
        EngineStatus {
            name: name.to_string(),
            running: self.is_running(),
            throttle: self.throttle(),
            thrust: self.thrust(),
            fuel_flow: self.fuel_flow(),
            readout,
        }
    }
}
