mod fuel;
mod ground;
mod stall;

pub use fuel::{burn_fuel, fuel_planning};
pub use ground::{
    apply_ground_constraint, clamp_to_ground, damp_angular_velocity, ground_reaction,
    ContactState, GroundReaction,
};
pub use stall::{stall_perturbation, StallPerturbation};

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use rand_chacha::ChaCha8Rng;

use crate::components::{
    AirData, AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, AircraftState, Attitude,
    ConfigError, ControlInputs, ControlSurfaceConfig, EngineStatus, FuelPlanning, GroundEffectConfig, Surface,
    SurfaceAngles, TrimAxis,
};
use crate::resources::{Atmosphere, SimulationConfig, WeatherConfig};
use crate::systems::aerodynamics::{
    calculate_air_data, is_stalled, stall_excess, AeroState, Aerodynamics,
};
use crate::systems::controls::ControlSurfaceSystem;
use crate::systems::physics::RigidBody;
use crate::systems::propulsion::{FlightConditions, PropulsionSystem};
use crate::utils::{
    body_rates, heading_orientation, orientation_to_euler, RngManager, SimError, GRAVITY,
    GROUND_CONTACT_HEIGHT, ISA_SEA_LEVEL_DENSITY, MIN_AIRSPEED,
};

const STALL_STREAM: &str = "stall_perturbation";

/// Parts of the aircraft that can be swapped while the simulation runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationUpdate {
    pub aero_coef: Option<AircraftAeroCoefficients>,
    pub geometry: Option<AircraftGeometry>,
    pub ground_effect: Option<GroundEffectConfig>,
    pub controls: Option<ControlSurfaceConfig>,
}

/// The flight model of one aircraft.
///
/// Owns the rigid body and every subsystem acting on it. [`FlightDynamics::update`] takes
/// wall-clock frame time and runs as many fixed physics steps as it covers; everything else
/// only sets inputs or reads the published [`AircraftState`].
#[derive(Debug, Clone)]
pub struct FlightDynamics {
    config: AircraftConfig,
    settings: SimulationConfig,
    body: RigidBody,
    aerodynamics: Aerodynamics,
    atmosphere: Atmosphere,
    propulsion: PropulsionSystem,
    controls: ControlSurfaceSystem,
    state: AircraftState,
    rng_manager: RngManager,
    stall_rng: ChaCha8Rng,
    fuel_mass: f64,
    fuel_flow: f64,
    ground_level: f64,
    accumulator: f64,
    previous_position: Vector3<f64>,
    previous_orientation: UnitQuaternion<f64>,
    time: f64,
    on_ground: bool,
    fuel_starved: bool,
}

impl FlightDynamics {
    /// Builds the model at the origin, on the ground, with full fuel and engines off.
    pub fn new(config: AircraftConfig, settings: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        settings.validate()?;

        let fuel_mass = config.mass.max_fuel_mass;
        let body = RigidBody::new(
            config.mass.total_mass(fuel_mass),
            config.mass.inertia(),
            config.mass.cg_offset,
        );
        let rng_manager = RngManager::new(settings.seed);

        info!(
            "Flight model for '{}' at {:.0} Hz",
            config.name,
            1.0 / settings.fixed_timestep
        );

        let mut dynamics = Self {
            aerodynamics: Aerodynamics::new(
                config.geometry,
                config.aero_coef,
                config.ground_effect,
            ),
            atmosphere: Atmosphere::default(),
            propulsion: PropulsionSystem::new(&config.propulsion),
            controls: ControlSurfaceSystem::new(config.controls.clone()),
            state: AircraftState::default(),
            stall_rng: rng_manager.get_rng(STALL_STREAM),
            rng_manager,
            fuel_mass,
            fuel_flow: 0.0,
            ground_level: 0.0,
            accumulator: 0.0,
            previous_position: Vector3::zeros(),
            previous_orientation: UnitQuaternion::identity(),
            time: 0.0,
            on_ground: true,
            fuel_starved: false,
            body,
            config,
            settings,
        };
        dynamics.reset(None, None);
        Ok(dynamics)
    }

    /// Places the aircraft at rest and restores full fuel, neutral controls and calm weather.
    ///
    /// `position` defaults to the origin at ground level, `heading` to zero. Engines keep
    /// running if they were.
    pub fn reset(&mut self, position: Option<Vector3<f64>>, heading: Option<f64>) {
        let position = position.unwrap_or_else(|| Vector3::new(0.0, self.ground_level, 0.0));
        self.body
            .reset(position, heading_orientation(heading.unwrap_or(0.0)));

        self.fuel_mass = self.config.mass.max_fuel_mass;
        self.fuel_flow = 0.0;
        self.fuel_starved = false;
        self.body.set_mass(self.config.mass.total_mass(self.fuel_mass));

        self.controls.reset();
        self.atmosphere.reset();
        self.stall_rng = self.rng_manager.get_rng(STALL_STREAM);

        self.accumulator = 0.0;
        self.time = 0.0;
        self.previous_position = self.body.position;
        self.previous_orientation = self.body.orientation;
        self.on_ground = self.body.position.y - self.ground_level <= GROUND_CONTACT_HEIGHT;
        self.state = self.build_state();
    }

    pub fn set_controls(&mut self, inputs: &ControlInputs) {
        self.controls.set_inputs(inputs);
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.propulsion.set_throttle(throttle);
        self.state.throttle = self.propulsion.throttle();
    }

    /// False if there is no engine at `index`.
    pub fn set_engine_throttle(&mut self, index: usize, throttle: f64) -> bool {
        let found = self.propulsion.set_engine_throttle(index, throttle);
        self.state.throttle = self.propulsion.throttle();
        found
    }

    pub fn set_mixture(&mut self, mixture: f64) {
        self.propulsion.set_mixture(mixture);
    }

    /// True if every engine started. Always false with empty tanks.
    pub fn start_engines(&mut self) -> bool {
        if self.fuel_mass <= 0.0 {
            warn!("Engine start refused, no fuel");
            return false;
        }
        self.fuel_starved = false;
        self.propulsion.start_all_engines()
    }

    pub fn shutdown_engines(&mut self) {
        self.propulsion.shutdown_all();
    }

    pub fn set_trim(&mut self, axis: TrimAxis, value: f64) {
        self.controls.set_trim(axis, value);
    }

    pub fn set_surface_failure(&mut self, surface: Surface, failed: bool) {
        self.controls.set_failure(surface, failed);
    }

    /// Sets the fuel load, clamped to the tank capacity, and the resulting mass.
    pub fn set_fuel_mass(&mut self, fuel_mass: f64) {
        self.fuel_mass = fuel_mass.clamp(0.0, self.config.mass.max_fuel_mass);
        if self.fuel_mass > 0.0 {
            self.fuel_starved = false;
        }
        self.body.set_mass(self.config.mass.total_mass(self.fuel_mass));
        self.state.fuel_mass = self.fuel_mass;
        self.state.mass = self.body.mass();
    }

    pub fn set_ground_level(&mut self, elevation: f64) {
        self.ground_level = elevation;
        self.state.altitude_agl = self.body.position.y - elevation;
    }

    pub fn set_weather(&mut self, weather: WeatherConfig) {
        self.atmosphere.set_weather(weather);
    }

    /// Replaces the aerodynamic model or control limits without touching the motion state.
    ///
    /// The updated configuration is validated first; on error nothing changes.
    pub fn update_configuration(&mut self, update: ConfigurationUpdate) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        if let Some(aero_coef) = update.aero_coef {
            config.aero_coef = aero_coef;
        }
        if let Some(geometry) = update.geometry {
            config.geometry = geometry;
        }
        if let Some(ground_effect) = update.ground_effect {
            config.ground_effect = ground_effect;
        }
        if let Some(controls) = update.controls {
            config.controls = controls;
        }
        if let Err(err) = config.validate() {
            warn!("Configuration update of '{}' rejected: {}", self.config.name, err);
            return Err(err);
        }

        self.aerodynamics.set_coefficients(config.aero_coef);
        self.aerodynamics.set_geometry(config.geometry);
        self.aerodynamics.set_ground_effect(config.ground_effect);
        if config.controls != self.config.controls {
            self.controls.set_config(config.controls.clone());
        }
        self.config = config;
        debug!("Configuration of '{}' updated", self.config.name);
        Ok(())
    }

    /// Accumulates frame time and runs the fixed steps it covers.
    ///
    /// Returns the fraction of a step left in the accumulator, in `[0, 1)`, for blending
    /// between the previous and the current pose.
    pub fn update(&mut self, delta_time: f64) -> f64 {
        let step = self.settings.fixed_timestep;
        let mut frame = if delta_time.is_finite() {
            delta_time.max(0.0)
        } else {
            0.0
        };
        if frame > self.settings.max_frame_time {
            debug!(
                "Frame time {:.3} s clamped to {:.3} s",
                frame, self.settings.max_frame_time
            );
            frame = self.settings.max_frame_time;
        }

        self.accumulator += frame;
        while self.accumulator >= step {
            self.fixed_update(step);
            self.accumulator -= step;
        }

        (self.accumulator / step).clamp(0.0, 1.0 - f64::EPSILON)
    }

    /// One physics step of `dt` seconds.
    pub fn fixed_update(&mut self, dt: f64) {
        self.previous_position = self.body.position;
        self.previous_orientation = self.body.orientation;
        let sink_rate = -self.body.velocity.y;

        let altitude = self.body.position.y;
        let agl = altitude - self.ground_level;
        let atmosphere = self.atmosphere.properties(altitude);
        let wind = self.atmosphere.wind_at(agl.max(0.0));
        let air = calculate_air_data(&self.body.velocity, &wind, &self.body.orientation);
        let conditions = FlightConditions::new(atmosphere, air.true_airspeed, altitude);

        let mass = self.body.mass();
        let stall_speed = self.aerodynamics.stall_speed(
            mass,
            atmosphere.density,
            self.controls.state().flaps.current,
        );
        self.controls.update(dt);
        self.controls
            .update_effectiveness(air.true_airspeed, stall_speed, conditions.mach());
        let deflections = self.controls.get_state();

        let mut loads = self.body.clear_forces();

        let weight = mass * self.settings.gravity;
        let gravity = Vector3::new(0.0, -weight, 0.0);
        loads.apply_force(&self.body.world_to_body(&gravity));

        let aero_state = AeroState::from_air_data(&air, self.body.angular_velocity, agl.max(0.0));
        let aero = self
            .aerodynamics
            .calculate_forces(&aero_state, &atmosphere, &deflections);
        let aero_vertical = self.body.body_to_world(&aero.forces).y;

        let was_on_ground = self.on_ground;
        self.on_ground = agl <= GROUND_CONTACT_HEIGHT && aero_vertical <= weight;

        let cg = *self.body.cg();
        if self.on_ground {
            clamp_to_ground(&mut self.body, self.ground_level);
            damp_angular_velocity(
                &mut self.body,
                self.config.ground_handling.angular_damping,
                dt,
            );

            // The tail still pitches the aircraft about its wheels.
            loads.apply_moment(&Vector3::new(0.0, 0.0, aero.moments.z));

            let output = self.propulsion.update(dt, &conditions, &cg);
            loads.apply_force(&output.thrust);
            self.fuel_flow = output.fuel_flow;

            let applied = gravity + self.body.body_to_world(&output.thrust);
            let contact = ContactState {
                brakes: self.controls.brakes(),
                gear_down: self.controls.gear_is_down(),
                rudder: self.controls.state().rudder.current,
            };
            let reaction = ground_reaction(
                &self.body,
                &applied,
                &self.config.ground_handling,
                &contact,
                dt,
            );
            loads.apply_force(&self.body.world_to_body(&reaction.force));
            loads.apply_moment(&reaction.moment);
        } else {
            loads.apply_force(&aero.forces);
            loads.apply_moment(&aero.moments);

            let output = self.propulsion.update(dt, &conditions, &cg);
            loads.apply_force(&output.thrust);
            loads.apply_moment(&output.moment);
            self.fuel_flow = output.fuel_flow;
        }

        self.body.update_accelerations(loads);
        self.body.integrate(dt);

        if self.on_ground {
            apply_ground_constraint(
                &mut self.body,
                self.ground_level,
                self.config.ground_handling.max_ground_pitch,
            );
        } else if self.body.position.y < self.ground_level {
            clamp_to_ground(&mut self.body, self.ground_level);
        }

        self.time += dt;
        self.state = self.build_state();

        if self.state.stalled && !self.on_ground {
            let excess = stall_excess(
                self.state.air_data.alpha,
                &self.aerodynamics.coefficients().stall,
            );
            let perturbation = stall_perturbation(
                &mut self.stall_rng,
                self.state.air_data.alpha,
                excess,
                self.state.air_data.dynamic_pressure,
                self.aerodynamics.geometry(),
            );
            self.body.apply_angular_impulse(&perturbation.moment, dt);
            self.body.apply_linear_impulse(&perturbation.force, dt);
            self.state = self.build_state();
        }

        self.burn_fuel(dt);

        if self.on_ground && !was_on_ground {
            info!(
                "Touchdown at {:.1} m/s, sink {:.2} m/s",
                self.state.air_data.ground_speed, sink_rate
            );
        } else if !self.on_ground && was_on_ground {
            info!(
                "Liftoff at {:.1} m/s indicated",
                self.state.air_data.indicated_airspeed
            );
        }
    }

    fn burn_fuel(&mut self, dt: f64) {
        self.fuel_mass = burn_fuel(self.fuel_mass, self.fuel_flow, dt);
        self.body.set_mass(self.config.mass.total_mass(self.fuel_mass));

        if self.fuel_mass <= 0.0 && self.propulsion.any_running() {
            if !self.fuel_starved {
                warn!("Fuel exhausted, shutting down engines");
                self.fuel_starved = true;
            }
            self.propulsion.shutdown_all();
            self.fuel_flow = 0.0;
        }

        self.state.fuel_mass = self.fuel_mass;
        self.state.fuel_flow = self.fuel_flow;
        self.state.mass = self.body.mass();
    }

    fn build_state(&self) -> AircraftState {
        let body = &self.body;
        let altitude = body.position.y;
        let altitude_agl = altitude - self.ground_level;
        let atmosphere = self.atmosphere.properties(altitude);
        let wind = self.atmosphere.wind_at(altitude_agl.max(0.0));
        let air = calculate_air_data(&body.velocity, &wind, &body.orientation);

        let density_ratio = (atmosphere.density / ISA_SEA_LEVEL_DENSITY).max(0.0);
        let mach = if atmosphere.speed_of_sound > 0.0 {
            air.true_airspeed / atmosphere.speed_of_sound
        } else {
            0.0
        };
        let euler = orientation_to_euler(&body.orientation);
        let (p, q, r) = body_rates(&body.angular_velocity);

        let specific_force = body.acceleration + Vector3::new(0.0, self.settings.gravity, 0.0);
        let load_factor = body.world_to_body(&specific_force) / GRAVITY;

        let stalled = air.true_airspeed > MIN_AIRSPEED
            && is_stalled(air.alpha, &self.aerodynamics.coefficients().stall);

        AircraftState {
            time: self.time,
            position: body.position,
            velocity: body.velocity,
            acceleration: body.acceleration,
            orientation: body.orientation,
            angular_velocity: body.angular_velocity,
            body_rates: Vector3::new(p, q, r),
            attitude: Attitude {
                roll: euler.x,
                pitch: euler.y,
                heading: euler.z,
            },
            altitude,
            altitude_agl,
            atmosphere,
            wind,
            air_data: AirData {
                true_airspeed: air.true_airspeed,
                indicated_airspeed: air.true_airspeed * density_ratio.sqrt(),
                mach,
                ground_speed: Vector3::new(body.velocity.x, 0.0, body.velocity.z).norm(),
                vertical_speed: body.velocity.y,
                alpha: air.alpha,
                beta: air.beta,
                dynamic_pressure: 0.5 * atmosphere.density * air.true_airspeed.powi(2),
            },
            mass: body.mass(),
            throttle: self.propulsion.throttle(),
            fuel_mass: self.fuel_mass,
            fuel_flow: self.fuel_flow,
            load_factor,
            on_ground: self.on_ground,
            stalled,
        }
    }

    /// Snapshot published after the last fixed step.
    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn interpolated_position(&self, alpha: f64) -> Vector3<f64> {
        self.previous_position
            .lerp(&self.body.position, alpha.clamp(0.0, 1.0))
    }

    pub fn interpolated_orientation(&self, alpha: f64) -> UnitQuaternion<f64> {
        self.previous_orientation
            .try_slerp(&self.body.orientation, alpha.clamp(0.0, 1.0), 1e-9)
            .unwrap_or(self.body.orientation)
    }

    pub fn fuel_planning(&self) -> FuelPlanning {
        fuel_planning(
            self.fuel_mass,
            self.fuel_flow,
            self.config.mass.max_fuel_mass,
            self.state.air_data.ground_speed,
        )
    }

    pub fn engine_status(&self) -> Vec<EngineStatus> {
        self.propulsion.engine_status()
    }

    /// Level-flight stall speed at the current weight, altitude and flap setting.
    pub fn stall_speed(&self) -> f64 {
        let density = self.atmosphere.properties(self.body.position.y).density;
        self.aerodynamics.stall_speed(
            self.body.mass(),
            density,
            self.controls.state().flaps.current,
        )
    }

    pub fn surface_angles(&self) -> SurfaceAngles {
        self.controls.get_angles()
    }

    pub fn controls(&self) -> &ControlSurfaceSystem {
        &self.controls
    }

    pub fn propulsion(&self) -> &PropulsionSystem {
        &self.propulsion
    }

    pub fn aerodynamics(&self) -> &Aerodynamics {
        &self.aerodynamics
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Direct access to the rigid body, for placing the aircraft or testing.
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn config(&self) -> &AircraftConfig {
        &self.config
    }

    pub fn settings(&self) -> &SimulationConfig {
        &self.settings
    }

    pub fn ground_level(&self) -> f64 {
        self.ground_level
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }
}
