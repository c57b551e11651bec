use crate::common::{create_test_cessna_config, create_test_simulation_config, TestApp};
use flyer_fdm::{
    resources::{WeatherConfig, WindProfile},
    systems::FlightDynamics,
};
use nalgebra::{UnitQuaternion, Vector3};

/// Creates a Cessna flight model at rest on the runway
pub fn create_test_dynamics() -> FlightDynamics {
    FlightDynamics::new(create_test_cessna_config(), create_test_simulation_config())
        .expect("test configuration is valid")
}

/// Places the aircraft in the air at `altitude` flying along world +X at `speed`
pub fn put_airborne(dynamics: &mut FlightDynamics, altitude: f64, speed: f64) {
    dynamics.reset(Some(Vector3::new(0.0, altitude, 0.0)), Some(0.0));
    dynamics.body_mut().velocity = Vector3::new(speed, 0.0, 0.0);
}

/// Pitches the aircraft nose up by `pitch` radians keeping its velocity
pub fn pitch_up(dynamics: &mut FlightDynamics, pitch: f64) {
    let body = dynamics.body_mut();
    body.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), pitch);
    body.rebuild_transform();
}

/// Uniform wind that moves the air mass with `velocity`
pub fn moving_air_mass(velocity: Vector3<f64>) -> WeatherConfig {
    WeatherConfig {
        wind: velocity,
        wind_profile: WindProfile::Constant,
        ..Default::default()
    }
}

/// Runs fixed steps until `condition` holds, returning the number of steps taken
pub fn run_until<F>(dynamics: &mut FlightDynamics, max_steps: usize, mut condition: F) -> Option<usize>
where
    F: FnMut(&FlightDynamics) -> bool,
{
    let step = dynamics.settings().fixed_timestep;
    for taken in 0..max_steps {
        if condition(dynamics) {
            return Some(taken);
        }
        dynamics.fixed_update(step);
    }
    None
}

/// Updates the app until `condition` holds or `max_frames` pass
pub fn wait_for_condition<F>(app: &mut TestApp, mut condition: F, max_frames: usize) -> bool
where
    F: FnMut(&mut TestApp) -> bool,
{
    for _ in 0..max_frames {
        if condition(app) {
            return true;
        }
        app.run_frame();
    }
    condition(app)
}
