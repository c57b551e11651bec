use approx::assert_relative_eq;
use flyer_fdm::{
    components::{AircraftConfig, ControlInputs, EngineReadout, TrimAxis},
    resources::WeatherConfig,
    systems::{flight_dynamics::burn_fuel, propulsion::Engine, FlightDynamics},
};
use nalgebra::Vector3;

use crate::common::{
    assert_aircraft_state_valid, create_test_dynamics, create_test_jet_config,
    create_test_piston_engine, create_test_simulation_config, pitch_up, put_airborne, run_until,
    takeoff_controls, TEST_STEP,
};

#[test]
fn test_takeoff_roll() {
    let mut dynamics = create_test_dynamics();
    dynamics.set_controls(&takeoff_controls());
    assert!(dynamics.start_engines());
    dynamics.set_throttle(1.0);

    let mut previous_speed = dynamics.state().air_data.ground_speed;
    for _ in 0..600 {
        dynamics.update(TEST_STEP);
        let state = dynamics.state();
        assert_aircraft_state_valid(state);
        assert!(
            state.air_data.ground_speed > previous_speed,
            "ground speed stalled at {} m/s after {} s",
            state.air_data.ground_speed,
            state.time
        );
        assert!(state.altitude_agl <= 0.1);
        assert!(state.on_ground);
        previous_speed = state.air_data.ground_speed;
    }

    assert_relative_eq!(dynamics.state().time, 5.0, epsilon = 1e-9);
    assert!(dynamics.state().velocity.x > 3.0);
    assert!(dynamics.controls().state().flaps.current > 0.0);
}

#[test]
fn test_elevator_rotates_on_takeoff_roll() {
    let mut dynamics = create_test_dynamics();
    dynamics.set_controls(&ControlInputs {
        elevator: Some(1.0),
        ..takeoff_controls()
    });
    assert!(dynamics.start_engines());
    dynamics.set_throttle(1.0);

    let rotated = run_until(&mut dynamics, 120 * 60, |d| {
        let state = d.state();
        state.on_ground && state.attitude.pitch > 1f64.to_radians()
    });

    assert!(rotated.is_some(), "nose never came up during the ground roll");
    let state = dynamics.state();
    assert!(state.altitude_agl <= 0.1);
    assert!(state.attitude.pitch <= dynamics.config().ground_handling.max_ground_pitch + 1e-9);
}

#[test]
fn test_nose_high_touchdown_keeps_pitch() {
    let mut dynamics = create_test_dynamics();
    dynamics.reset(Some(Vector3::new(0.0, 0.05, 0.0)), Some(0.0));
    let pitch = 8f64.to_radians();
    pitch_up(&mut dynamics, pitch);
    dynamics.body_mut().velocity = Vector3::new(22.0, -1.0, 0.0);

    dynamics.fixed_update(TEST_STEP);

    let state = dynamics.state();
    assert!(state.on_ground);
    assert_eq!(state.position.y, 0.0);
    assert!(
        state.attitude.pitch > 7f64.to_radians(),
        "pitch snapped to {} rad",
        state.attitude.pitch
    );
}

#[test]
fn test_brakes_hold_idle_thrust() {
    let mut dynamics = create_test_dynamics();
    dynamics.set_controls(&ControlInputs {
        brakes: Some(1.0),
        ..Default::default()
    });
    assert!(dynamics.start_engines());

    for _ in 0..240 {
        dynamics.update(TEST_STEP);
    }
    assert_eq!(dynamics.state().air_data.ground_speed, 0.0);
}

#[test]
fn test_piston_start_gating() {
    let mut engine = Engine::from_config(&create_test_piston_engine());

    engine.set_throttle(0.5);
    assert!(!engine.start());
    assert!(!engine.is_running());

    engine.set_throttle(0.0);
    engine.set_mixture(1.0);
    assert!(engine.start());
    match &engine {
        Engine::Piston(piston) => {
            assert_relative_eq!(piston.rpm, piston.config().idle_rpm);
        }
        Engine::Jet(_) => panic!("expected a piston engine"),
    }

    assert!(!engine.start(), "a running engine cannot be started again");
}

#[test]
fn test_fuel_burn_reaches_exactly_zero() {
    let flow = 0.02;
    let mut fuel = 1.5;
    let steps = (fuel / flow / TEST_STEP).round() as usize;
    for _ in 0..steps {
        fuel = burn_fuel(fuel, flow, TEST_STEP);
        assert!(fuel >= 0.0);
    }
    assert_eq!(fuel, 0.0);
}

#[test]
fn test_fuel_starvation_stops_engines() {
    let mut dynamics = create_test_dynamics();
    dynamics.set_fuel_mass(0.02);
    assert!(dynamics.start_engines());
    dynamics.set_throttle(1.0);

    let empty_mass = dynamics.config().mass.empty_mass;
    let steps = run_until(&mut dynamics, 120 * 60, |d| {
        assert!(d.fuel_mass() >= 0.0);
        d.fuel_mass() == 0.0
    });

    assert!(steps.is_some(), "fuel never ran out");
    assert!(!dynamics.propulsion().any_running());
    assert_eq!(dynamics.state().fuel_flow, 0.0);
    assert_relative_eq!(dynamics.state().mass, empty_mass);
    assert!(!dynamics.start_engines(), "engines restarted on empty tanks");

    dynamics.fixed_update(TEST_STEP);
    assert_eq!(dynamics.fuel_mass(), 0.0);
}

#[test]
fn test_fuel_planning_tracks_burn() {
    let mut dynamics = create_test_dynamics();
    assert!(dynamics.start_engines());
    dynamics.set_throttle(0.8);
    for _ in 0..120 {
        dynamics.update(TEST_STEP);
    }

    let planning = dynamics.fuel_planning();
    assert!(planning.fuel_flow > 0.0);
    assert!(planning.fuel_mass < dynamics.config().mass.max_fuel_mass);
    assert_relative_eq!(
        planning.endurance,
        planning.fuel_mass / planning.fuel_flow,
        max_relative = 1e-12
    );
    assert!(planning.range > 0.0);
    assert!(planning.fuel_fraction < 1.0);
}

#[test]
fn test_stall_perturbation_is_seeded() {
    let run = || {
        let mut dynamics = create_test_dynamics();
        put_airborne(&mut dynamics, 1500.0, 35.0);
        pitch_up(&mut dynamics, 25f64.to_radians());
        dynamics.fixed_update(TEST_STEP);
        assert!(dynamics.state().stalled);
        for _ in 0..119 {
            dynamics.fixed_update(TEST_STEP);
        }
        dynamics.state().clone()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_stall_pitches_nose_down() {
    let mut dynamics = create_test_dynamics();
    put_airborne(&mut dynamics, 1500.0, 35.0);
    let pitch = 25f64.to_radians();
    pitch_up(&mut dynamics, pitch);

    for _ in 0..240 {
        dynamics.fixed_update(TEST_STEP);
    }
    assert!(dynamics.state().attitude.pitch < pitch);
}

#[test]
fn test_twin_jet_spools_up() {
    let mut dynamics = FlightDynamics::new(create_test_jet_config(), create_test_simulation_config())
        .expect("valid configuration");
    assert!(dynamics.start_engines());
    dynamics.set_throttle(1.0);

    for _ in 0..(120 * 5) {
        dynamics.update(TEST_STEP);
    }

    let status = dynamics.engine_status();
    assert_eq!(status.len(), 2);
    for engine in &status {
        assert!(engine.running);
        assert!(engine.thrust > 0.0);
        match engine.readout {
            EngineReadout::Jet { n1, n2, .. } => {
                assert!(n1 > 50.0, "N1 only reached {}", n1);
                assert!(n2 > 0.0);
            }
            EngineReadout::Piston { .. } => panic!("expected turbofan readouts"),
        }
    }
    assert_relative_eq!(status[0].thrust, status[1].thrust, max_relative = 1e-12);
    assert!(dynamics.state().velocity.x > 0.0);
    assert!(dynamics.state().attitude.heading.abs() < 1e-9);
}

#[test]
fn test_elevator_trim_changes_pitch_rate() {
    let trimmed = |trim: f64| {
        let mut dynamics = create_test_dynamics();
        put_airborne(&mut dynamics, 1500.0, 55.0);
        dynamics.set_trim(TrimAxis::Elevator, trim);
        for _ in 0..60 {
            dynamics.fixed_update(TEST_STEP);
        }
        dynamics.state().body_rates.y
    };

    assert!(trimmed(0.3) > trimmed(-0.3));
}

#[test]
fn test_headwind_raises_airspeed() {
    let mut dynamics = create_test_dynamics();
    put_airborne(&mut dynamics, 1500.0, 50.0);
    dynamics.set_weather(WeatherConfig::with_wind_from(10.0, 0.0));
    dynamics.fixed_update(TEST_STEP);

    let state = dynamics.state();
    assert_relative_eq!(state.air_data.true_airspeed, 60.0, epsilon = 0.5);
    assert_relative_eq!(state.air_data.ground_speed, 50.0, epsilon = 0.5);
    assert!(state.air_data.indicated_airspeed < state.air_data.true_airspeed);
}

#[test]
fn test_reset_places_aircraft() {
    let mut dynamics = create_test_dynamics();
    dynamics.reset(Some(Vector3::new(100.0, 800.0, -50.0)), Some(1.2));

    let state = dynamics.state();
    assert_eq!(state.position, Vector3::new(100.0, 800.0, -50.0));
    assert_relative_eq!(state.attitude.heading, 1.2, epsilon = 1e-9);
    assert!(!state.on_ground);
    assert_eq!(
        state.fuel_mass,
        AircraftConfig::cessna_172().mass.max_fuel_mass
    );
}
