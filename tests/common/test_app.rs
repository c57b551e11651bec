use bevy::{prelude::*, time::TimeUpdateStrategy};
use flyer_fdm::{
    components::{AircraftConfig, AircraftState},
    plugins::FlightDynamicsPlugin,
    resources::SimulationConfig,
};
use nalgebra::Vector3;
use std::time::Duration;

// Builder for creating a headless test application around one flight model
pub struct TestAppBuilder {
    aircraft: AircraftConfig,
    settings: SimulationConfig,
    start: Option<(Vector3<f64>, f64)>,
    frame_time: f64,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            aircraft: AircraftConfig::cessna_172(),
            settings: SimulationConfig::default(),
            start: None,
            frame_time: 1.0 / 60.0,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aircraft(mut self, config: AircraftConfig) -> Self {
        self.aircraft = config;
        self
    }

    pub fn with_settings(mut self, settings: SimulationConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_start(mut self, position: Vector3<f64>, heading: f64) -> Self {
        self.start = Some((position, heading));
        self
    }

    pub fn with_frame_time(mut self, frame_time: f64) -> Self {
        self.frame_time = frame_time;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        let mut plugin = FlightDynamicsPlugin::new(self.aircraft).with_settings(self.settings);
        if let Some((position, heading)) = self.start {
            plugin = plugin.with_start(position, heading);
        }

        app.add_plugins(MinimalPlugins)
            .add_plugins(plugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(
                Duration::from_secs_f64(self.frame_time),
            ));

        // Run an initial update to spawn the aircraft
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    pub fn run_frame(&mut self) {
        self.app.update();
    }

    pub fn send_event<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    pub fn aircraft_state(&mut self) -> Option<AircraftState> {
        self.query_single::<AircraftState>().cloned()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn query_all<T: Component>(&mut self) -> Vec<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.iter(world).collect()
    }
}
