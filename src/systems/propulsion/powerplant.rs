use bevy::prelude::*;
use nalgebra::Vector3;

use super::engine::{Engine, FlightConditions};
use crate::components::{EngineConfig, EngineStatus, PropulsionConfig};

/// Summed output of all engines for one step, body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionOutput {
    /// Total thrust vector (N)
    pub thrust: Vector3<f64>,
    /// Moment of the thrust about the centre of gravity (N·m)
    pub moment: Vector3<f64>,
    /// Total fuel flow (kg/s)
    pub fuel_flow: f64,
}

impl Default for PropulsionOutput {
    fn default() -> Self {
        Self {
            thrust: Vector3::zeros(),
            moment: Vector3::zeros(),
            fuel_flow: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Powerplant {
    config: EngineConfig,
    engine: Engine,
}

/// All engines of the aircraft, each with its mounting position and thrust line.
#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionSystem {
    powerplants: Vec<Powerplant>,
}

impl PropulsionSystem {
    pub fn new(config: &PropulsionConfig) -> Self {
        Self {
            powerplants: config
                .engines
                .iter()
                .map(|engine| Powerplant {
                    config: engine.clone(),
                    engine: Engine::from_config(engine),
                })
                .collect(),
        }
    }

    /// Returns every engine to its stopped initial state.
    pub fn reset(&mut self) {
        for powerplant in &mut self.powerplants {
            powerplant.engine = Engine::from_config(&powerplant.config);
        }
    }

    pub fn engine_count(&self) -> usize {
        self.powerplants.len()
    }

    pub fn engine(&self, index: usize) -> Option<&Engine> {
        self.powerplants.get(index).map(|p| &p.engine)
    }

    pub fn engine_mut(&mut self, index: usize) -> Option<&mut Engine> {
        self.powerplants.get_mut(index).map(|p| &mut p.engine)
    }

    /// Sets the same throttle on every engine.
    pub fn set_throttle(&mut self, throttle: f64) {
        for powerplant in &mut self.powerplants {
            powerplant.engine.set_throttle(throttle);
        }
    }

    /// Sets the throttle of one engine. Returns false for an unknown index.
    pub fn set_engine_throttle(&mut self, index: usize, throttle: f64) -> bool {
        match self.engine_mut(index) {
            Some(engine) => {
                engine.set_throttle(throttle);
                true
            }
            None => {
                warn!("No engine at index {}", index);
                false
            }
        }
    }

    pub fn set_mixture(&mut self, mixture: f64) {
        for powerplant in &mut self.powerplants {
            powerplant.engine.set_mixture(mixture);
        }
    }

    /// Mean throttle over all engines.
    pub fn throttle(&self) -> f64 {
        if self.powerplants.is_empty() {
            return 0.0;
        }
        self.powerplants
            .iter()
            .map(|p| p.engine.throttle())
            .sum::<f64>()
            / self.powerplants.len() as f64
    }

    pub fn any_running(&self) -> bool {
        self.powerplants.iter().any(|p| p.engine.is_running())
    }

    /// Attempts to start every engine. True only if all of them started.
    pub fn start_all_engines(&mut self) -> bool {
        let mut all_started = true;
        for powerplant in &mut self.powerplants {
            if powerplant.engine.start() {
                info!("Engine '{}' started", powerplant.config.name);
            } else {
                warn!("Engine '{}' failed to start", powerplant.config.name);
                all_started = false;
            }
        }
        all_started
    }

    pub fn shutdown_all(&mut self) {
        for powerplant in &mut self.powerplants {
            if powerplant.engine.is_running() {
                info!("Engine '{}' shut down", powerplant.config.name);
            }
            powerplant.engine.shutdown();
        }
    }

    /// Advances every engine and sums thrust, moment about `cg` and fuel flow.
    pub fn update(
        &mut self,
        dt: f64,
        conditions: &FlightConditions,
        cg: &Vector3<f64>,
    ) -> PropulsionOutput {
        let mut output = PropulsionOutput::default();

        for powerplant in &mut self.powerplants {
            powerplant.engine.update(dt, conditions);

            let thrust = powerplant.config.thrust_axis() * powerplant.engine.thrust();
            output.thrust += thrust;
            output.moment += (powerplant.config.position - cg).cross(&thrust);
            output.fuel_flow += powerplant.engine.fuel_flow();
        }

        output
    }

    pub fn engine_status(&self) -> Vec<EngineStatus> {
        self.powerplants
            .iter()
            .map(|p| p.engine.status(&p.config.name))
            .collect()
    }
}
