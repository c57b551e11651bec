use bevy::prelude::*;
use flyer_fdm::{
    components::{AircraftConfig, AircraftState, ControlInputs},
    plugins::{ControlInputEvent, EngineCommandEvent, FlightModel, ThrottleEvent},
    resources::SimulationConfig,
};
use nalgebra::Vector3;

use crate::common::{assert_aircraft_state_valid, wait_for_condition, TestAppBuilder};

#[test]
fn test_plugin_spawns_aircraft() {
    let mut app = TestAppBuilder::new().build();

    assert_eq!(app.query_all::<FlightModel>().len(), 1);
    let state = app.aircraft_state().expect("aircraft state component");
    assert_aircraft_state_valid(&state);
    assert!(state.on_ground);

    let name = app.query_single::<Name>().expect("named entity");
    assert_eq!(name.as_str(), "Cessna172");
}

#[test]
fn test_plugin_advances_simulation_time() {
    let mut app = TestAppBuilder::new()
        .with_start(Vector3::new(0.0, 1000.0, 0.0), 0.0)
        .build();
    app.run_steps(30);

    let state = app.aircraft_state().expect("aircraft state component");
    assert!(state.time > 0.0);
    assert!(state.time <= 31.0 / 60.0 + 1e-9);
    assert!(state.position.y < 1000.0, "aircraft did not fall");

    let transform = *app.query_single::<Transform>().expect("transform");
    assert!(transform.translation.y < 1000.0);
    assert!(transform.translation.is_finite());
}

#[test]
fn test_engine_and_throttle_events() {
    let mut app = TestAppBuilder::new().build();

    app.send_event(EngineCommandEvent::Start);
    app.run_frame();
    app.send_event(ThrottleEvent {
        engine: None,
        throttle: 1.0,
    });
    app.send_event(ControlInputEvent(ControlInputs {
        flaps: Some(0.25),
        ..Default::default()
    }));

    let rolling = wait_for_condition(
        &mut app,
        |app| {
            app.aircraft_state()
                .map(|state| state.air_data.ground_speed > 1.0)
                .unwrap_or(false)
        },
        300,
    );
    assert!(rolling, "aircraft never started its takeoff roll");

    let model = app.query_single::<FlightModel>().expect("flight model");
    assert!(model.propulsion().any_running());
    assert_eq!(model.state().throttle, 1.0);
    assert!(model.controls().state().flaps.target > 0.0);

    app.send_event(EngineCommandEvent::Shutdown);
    app.run_frame();
    let model = app.query_single::<FlightModel>().expect("flight model");
    assert!(!model.propulsion().any_running());
}

#[test]
fn test_invalid_aircraft_is_not_spawned() {
    let mut aircraft = AircraftConfig::cessna_172();
    aircraft.mass.empty_mass = -1.0;

    let mut app = TestAppBuilder::new()
        .with_aircraft(aircraft)
        .with_settings(SimulationConfig::default())
        .build();
    app.run_frame();

    assert!(app.query_all::<AircraftState>().is_empty());
}
