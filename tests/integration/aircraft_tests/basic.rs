use approx::assert_relative_eq;
use flyer_fdm::{
    components::{AircraftConfig, ControlDeflections, ControlInputs},
    resources::Atmosphere,
    systems::{
        aerodynamics::Aerodynamics,
        propulsion::{Engine, FlightConditions},
        FlightDynamics,
    },
};
use nalgebra::Vector3;
use pretty_assertions::assert_eq;

use crate::common::{
    assert_aircraft_state_valid, assert_position_eq, assert_unit_quaternion,
    create_test_cessna_config, create_test_dynamics, create_test_jet_engine,
    create_test_piston_engine, create_zero_gravity_config, moving_air_mass, neutral_controls,
    put_airborne, stall_model, TEST_STEP,
};

fn aerodynamics(config: &AircraftConfig) -> Aerodynamics {
    Aerodynamics::new(config.geometry, config.aero_coef, config.ground_effect)
}

#[test]
fn test_quaternion_stays_normalized() {
    let mut dynamics = create_test_dynamics();
    put_airborne(&mut dynamics, 1500.0, 60.0);
    dynamics.body_mut().angular_velocity = Vector3::new(0.6, -0.4, 0.3);
    dynamics.set_controls(&ControlInputs {
        aileron: Some(0.5),
        rudder: Some(-0.3),
        ..neutral_controls()
    });

    for _ in 0..600 {
        dynamics.fixed_update(TEST_STEP);
        assert_unit_quaternion(&dynamics.body().orientation, 1e-9);
        assert_aircraft_state_valid(dynamics.state());
    }
}

#[test]
fn test_zero_force_motion_is_linear() {
    let mut dynamics =
        FlightDynamics::new(create_test_cessna_config(), create_zero_gravity_config())
            .expect("valid configuration");
    let velocity = Vector3::new(40.0, 0.0, -3.0);
    put_airborne(&mut dynamics, 2000.0, 0.0);
    dynamics.body_mut().velocity = velocity;
    dynamics.set_weather(moving_air_mass(velocity));

    let start = dynamics.body().position;
    for step in 1..=240 {
        dynamics.fixed_update(TEST_STEP);
        let expected = start + velocity * (step as f64 * TEST_STEP);
        assert_position_eq(&dynamics.body().position, &expected, 1e-6);
    }
    assert_relative_eq!(dynamics.body().velocity, velocity, epsilon = 1e-12);
    assert_eq!(dynamics.state().air_data.true_airspeed, 0.0);
}

#[test]
fn test_thrust_is_zero_when_not_running() {
    let atmosphere = Atmosphere::default();
    for engine_config in [create_test_piston_engine(), create_test_jet_engine()] {
        let mut engine = Engine::from_config(&engine_config);
        engine.set_throttle(1.0);

        for (altitude, airspeed) in [(0.0, 0.0), (0.0, 40.0), (3000.0, 120.0)] {
            let conditions =
                FlightConditions::new(atmosphere.properties(altitude), airspeed, altitude);
            engine.update(0.1, &conditions);
            assert!(!engine.is_running());
            assert_eq!(engine.calculate_thrust(&conditions), 0.0);
            assert_eq!(engine.thrust(), 0.0);
        }
    }
}

#[test]
fn test_lift_coefficient_at_zero_alpha_is_cl0() {
    for config in [AircraftConfig::cessna_172(), AircraftConfig::light_jet()] {
        let aero = aerodynamics(&config);
        let cl = aero.lift_coefficient(0.0, &ControlDeflections::default());
        assert_eq!(cl, config.aero_coef.lift.c_l_0);
    }
}

#[test]
fn test_stall_boundary() {
    let config = create_test_cessna_config();
    let aero = aerodynamics(&config);
    let stall = stall_model(&config);
    let controls = ControlDeflections::default();
    let cl_max = aero.max_lift_coefficient(0.0);

    let below = stall.alpha_stall - 1e-4;
    assert_eq!(
        aero.lift_coefficient(below, &controls),
        aero.linear_lift_coefficient(below, &controls)
    );

    let band_end = stall.alpha_stall + stall.stall_transition;
    let cl = aero.lift_coefficient(band_end, &controls);
    let floor = stall.post_stall_floor * cl_max;
    let peak = stall.peak_retention * cl_max;
    assert!(cl >= floor - 1e-9, "lift {} fell below the floor {}", cl, floor);
    assert!(
        cl - floor <= peak - floor + 1e-9,
        "lift {} too far above the floor {}",
        cl,
        floor
    );
    assert!(cl < aero.linear_lift_coefficient(band_end, &controls));
}

#[test]
fn test_ground_clamp() {
    let mut dynamics = create_test_dynamics();
    dynamics.body_mut().position.y = -0.5;
    dynamics.body_mut().velocity.y = -3.0;

    dynamics.fixed_update(TEST_STEP);

    assert_eq!(dynamics.body().velocity.y, 0.0);
    assert_eq!(dynamics.body().position.y, 0.0);
    assert!(dynamics.state().on_ground);
}

#[test]
fn test_ground_clamp_at_elevation() {
    let mut dynamics = create_test_dynamics();
    dynamics.set_ground_level(250.0);
    dynamics.reset(None, None);
    assert_eq!(dynamics.body().position.y, 250.0);

    dynamics.body_mut().position.y = 249.0;
    dynamics.body_mut().velocity.y = -2.0;
    dynamics.fixed_update(TEST_STEP);

    assert_eq!(dynamics.body().position.y, 250.0);
    assert_eq!(dynamics.body().velocity.y, 0.0);
    assert_relative_eq!(dynamics.state().altitude_agl, 0.0);
}

#[test]
fn test_resting_aircraft_stays_put() {
    let mut dynamics = create_test_dynamics();
    for _ in 0..240 {
        dynamics.fixed_update(TEST_STEP);
    }
    let state = dynamics.state();
    assert!(state.on_ground);
    assert_eq!(state.position, Vector3::zeros());
    assert_eq!(state.velocity, Vector3::zeros());
    assert_relative_eq!(state.load_factor.y, 1.0, epsilon = 1e-9);
}
