use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{AircraftConfig, AircraftState, ControlInputs};
use crate::resources::SimulationConfig;
use crate::systems::flight_dynamics::FlightDynamics;

/// Order of the per-frame flight model work.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FlightDynamicsSet {
    Input,
    Simulation,
}

/// New control targets for every flight model.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ControlInputEvent(pub ControlInputs);

/// Throttle for one engine, or all of them when `engine` is `None`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ThrottleEvent {
    pub engine: Option<usize>,
    pub throttle: f64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum EngineCommandEvent {
    Start,
    Shutdown,
    SetMixture(f64),
}

/// The flight model driving an entity's [`Transform`] and [`AircraftState`].
#[derive(Component, Deref, DerefMut)]
pub struct FlightModel(pub FlightDynamics);

/// Spawns one simulated aircraft and advances it with the frame time.
///
/// Physics runs inside [`FlightDynamics::update`] at the configured fixed rate, so the whole
/// step stays in one system and the `Transform` carries the interpolated pose.
pub struct FlightDynamicsPlugin {
    pub aircraft: AircraftConfig,
    pub settings: SimulationConfig,
    pub position: Option<Vector3<f64>>,
    pub heading: Option<f64>,
}

impl FlightDynamicsPlugin {
    pub fn new(aircraft: AircraftConfig) -> Self {
        Self {
            aircraft,
            settings: SimulationConfig::default(),
            position: None,
            heading: None,
        }
    }

    pub fn with_settings(mut self, settings: SimulationConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_start(mut self, position: Vector3<f64>, heading: f64) -> Self {
        self.position = Some(position);
        self.heading = Some(heading);
        self
    }

    fn setup_aircraft(
        mut commands: Commands,
        aircraft: AircraftConfig,
        settings: SimulationConfig,
        position: Option<Vector3<f64>>,
        heading: Option<f64>,
    ) {
        let name = aircraft.name.clone();
        let mut dynamics = match FlightDynamics::new(aircraft, settings) {
            Ok(dynamics) => dynamics,
            Err(err) => {
                error!("Could not build flight model for '{}': {}", name, err);
                return;
            }
        };
        dynamics.reset(position, heading);

        let state = dynamics.state().clone();
        commands.spawn((
            Name::new(name),
            pose_transform(&state.position, &state.orientation),
            state,
            FlightModel(dynamics),
        ));
    }
}

impl Plugin for FlightDynamicsPlugin {
    fn build(&self, app: &mut App) {
        let aircraft = self.aircraft.clone();
        let settings = self.settings.clone();
        let (position, heading) = (self.position, self.heading);

        app.insert_resource(self.settings.clone())
            .add_event::<ControlInputEvent>()
            .add_event::<ThrottleEvent>()
            .add_event::<EngineCommandEvent>()
            .configure_sets(
                Update,
                (FlightDynamicsSet::Input, FlightDynamicsSet::Simulation).chain(),
            )
            .add_systems(Startup, move |commands: Commands| {
                Self::setup_aircraft(
                    commands,
                    aircraft.clone(),
                    settings.clone(),
                    position,
                    heading,
                )
            })
            .add_systems(
                Update,
                (
                    apply_flight_inputs.in_set(FlightDynamicsSet::Input),
                    flight_dynamics_system.in_set(FlightDynamicsSet::Simulation),
                ),
            );
    }
}

/// Hands pending control, throttle and engine events to every flight model.
pub fn apply_flight_inputs(
    mut control_events: EventReader<ControlInputEvent>,
    mut throttle_events: EventReader<ThrottleEvent>,
    mut engine_events: EventReader<EngineCommandEvent>,
    mut query: Query<&mut FlightModel>,
) {
    let controls: Vec<ControlInputs> = control_events.read().map(|e| e.0).collect();
    let throttles: Vec<ThrottleEvent> = throttle_events.read().copied().collect();
    let commands: Vec<EngineCommandEvent> = engine_events.read().copied().collect();

    for mut model in query.iter_mut() {
        for inputs in &controls {
            model.set_controls(inputs);
        }
        for event in &throttles {
            match event.engine {
                Some(index) => {
                    model.set_engine_throttle(index, event.throttle);
                }
                None => model.set_throttle(event.throttle),
            }
        }
        for command in &commands {
            match command {
                EngineCommandEvent::Start => {
                    model.start_engines();
                }
                EngineCommandEvent::Shutdown => model.shutdown_engines(),
                EngineCommandEvent::SetMixture(mixture) => model.set_mixture(*mixture),
            }
        }
    }
}

/// Advances each flight model by the frame time and publishes its state and pose.
pub fn flight_dynamics_system(
    time: Res<Time>,
    mut query: Query<(&mut FlightModel, &mut AircraftState, &mut Transform)>,
) {
    let dt = time.delta_secs_f64();
    for (mut model, mut state, mut transform) in query.iter_mut() {
        let alpha = model.update(dt);
        *state = model.state().clone();
        *transform = pose_transform(
            &model.interpolated_position(alpha),
            &model.interpolated_orientation(alpha),
        );
    }
}

fn pose_transform(
    position: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> Transform {
    let q = orientation.quaternion();
    Transform::from_xyz(position.x as f32, position.y as f32, position.z as f32)
        .with_rotation(Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32))
}
