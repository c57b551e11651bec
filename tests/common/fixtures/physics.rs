use flyer_fdm::resources::SimulationConfig;

pub const TEST_STEP: f64 = 1.0 / 120.0;

/// Creates a 120 Hz simulation configuration with a fixed seed
pub fn create_test_simulation_config() -> SimulationConfig {
    SimulationConfig {
        seed: 1234,
        ..SimulationConfig::with_rate(120.0)
    }
}

/// Same as [`create_test_simulation_config`] with gravity switched off
pub fn create_zero_gravity_config() -> SimulationConfig {
    SimulationConfig {
        gravity: 0.0,
        ..create_test_simulation_config()
    }
}

