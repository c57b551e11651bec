use serde::{Deserialize, Serialize};

/// Kind-specific readouts of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineReadout {
    Jet {
        /// Low pressure spool speed (%)
        n1: f64,
        /// High pressure spool speed (%)
        n2: f64,
        /// Exhaust gas temperature (°C)
        egt: f64,
    },
    Piston {
        rpm: f64,
        /// Manifold pressure (Pa)
        manifold_pressure: f64,
        /// Cylinder head temperature (°C)
        cht: f64,
        /// Oil temperature (°C)
        oil_temperature: f64,
        /// Oil pressure (psi)
        oil_pressure: f64,
        mixture: f64,
    },
}

/// Snapshot of one engine for instruments and aircraft systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub name: String,
    pub running: bool,
    pub throttle: f64,
    /// Thrust of the last step (N)
    pub thrust: f64,
    /// Fuel flow of the last step (kg/s)
    pub fuel_flow: f64,
    pub readout: EngineReadout,
}

/// Fuel state summary for downstream consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPlanning {
    /// Remaining fuel (kg)
    pub fuel_mass: f64,
    /// Current total fuel flow (kg/s)
    pub fuel_flow: f64,
    /// Time until empty at the current flow (s). Infinite when nothing burns.
    pub endurance: f64,
    /// Distance until empty at the current ground speed (m)
    pub range: f64,
    /// Remaining fraction of the fuel capacity
    pub fuel_fraction: f64,
}
