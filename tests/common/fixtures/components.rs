use flyer_fdm::components::{
    AircraftConfig, ControlInputs, EngineConfig, JetConfig, PistonConfig, StallCoefficients,
};

/// Creates the single piston trainer used by most tests
pub fn create_test_cessna_config() -> AircraftConfig {
    AircraftConfig::cessna_172()
}

/// Creates the twin turbofan configuration
pub fn create_test_jet_config() -> AircraftConfig {
    AircraftConfig::light_jet()
}

pub fn create_test_piston_engine() -> EngineConfig {
    EngineConfig::piston("test_piston", PistonConfig::default())
}

pub fn create_test_jet_engine() -> EngineConfig {
    EngineConfig::jet("test_jet", JetConfig::default())
}

/// Every surface centred, gear down, brakes off
pub fn neutral_controls() -> ControlInputs {
    ControlInputs {
        aileron: Some(0.0),
        elevator: Some(0.0),
        rudder: Some(0.0),
        flaps: Some(0.0),
        spoilers: Some(0.0),
        speed_brake: Some(0.0),
        gear_down: Some(true),
        brakes: Some(0.0),
    }
}

/// Takeoff flap setting with everything else neutral
pub fn takeoff_controls() -> ControlInputs {
    ControlInputs {
        flaps: Some(0.25),
        ..neutral_controls()
    }
}

pub fn stall_model(config: &AircraftConfig) -> StallCoefficients {
    config.aero_coef.stall
}
