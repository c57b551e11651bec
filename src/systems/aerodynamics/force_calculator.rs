use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::air_data::AeroState;
use super::ground_effect::ground_effect_factor;
use super::stall::stall_lift_coefficient;
use crate::components::{
    AircraftAeroCoefficients, AircraftGeometry, ControlDeflections, GroundEffectConfig,
};
use crate::resources::AtmosphereProperties;
use crate::utils::{body_rates, moment_from_axes, GRAVITY};

/// Non-dimensional force and moment coefficients of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficientValues {
    pub c_l: f64,
    pub c_d: f64,
    pub c_y: f64,
    pub c_roll: f64,
    pub c_m: f64,
    pub c_n: f64,
}

/// Result of [`Aerodynamics::calculate_forces`]. Vectors are in the body frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AeroForces {
    pub forces: Vector3<f64>,
    pub moments: Vector3<f64>,
    pub lift: f64,
    pub drag: f64,
    pub side_force: f64,
    pub dynamic_pressure: f64,
    pub coefficients: AeroCoefficientValues,
}

/// Coefficient-build-up aerodynamic model of a fixed-wing aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct Aerodynamics {
    geometry: AircraftGeometry,
    coefficients: AircraftAeroCoefficients,
    ground_effect: GroundEffectConfig,
}

impl Aerodynamics {
    pub fn new(
        geometry: AircraftGeometry,
        coefficients: AircraftAeroCoefficients,
        ground_effect: GroundEffectConfig,
    ) -> Self {
        Self {
            geometry,
            coefficients,
            ground_effect,
        }
    }

    pub fn geometry(&self) -> &AircraftGeometry {
        &self.geometry
    }

    pub fn coefficients(&self) -> &AircraftAeroCoefficients {
        &self.coefficients
    }

    pub fn ground_effect(&self) -> &GroundEffectConfig {
        &self.ground_effect
    }

    pub fn set_geometry(&mut self, geometry: AircraftGeometry) {
        self.geometry = geometry;
    }

    pub fn set_coefficients(&mut self, coefficients: AircraftAeroCoefficients) {
        self.coefficients = coefficients;
    }

    pub fn set_ground_effect(&mut self, ground_effect: GroundEffectConfig) {
        self.ground_effect = ground_effect;
    }

    /// Maximum lift coefficient with the given flap setting.
    pub fn max_lift_coefficient(&self, flaps: f64) -> f64 {
        let lift = &self.coefficients.lift;
        lift.c_l_max + lift.c_l_flap * flaps.clamp(0.0, 1.0)
    }

    /// Linear lift coefficient before the stall model.
    pub fn linear_lift_coefficient(&self, alpha: f64, controls: &ControlDeflections) -> f64 {
        let lift = &self.coefficients.lift;
        lift.c_l_0
            + lift.c_l_alpha * alpha
            + lift.c_l_flap * controls.flaps
            + lift.c_l_deltae * controls.elevator
            + lift.c_l_spoiler * controls.spoilers
    }

    /// Lift coefficient including the stall model.
    pub fn lift_coefficient(&self, alpha: f64, controls: &ControlDeflections) -> f64 {
        stall_lift_coefficient(
            self.linear_lift_coefficient(alpha, controls),
            alpha,
            self.max_lift_coefficient(controls.flaps),
            &self.coefficients.stall,
        )
    }

    /// Induced drag factor `1 / (π·AR·e)`.
    pub fn induced_drag_factor(&self) -> f64 {
        1.0 / (PI * self.geometry.aspect_ratio() * self.coefficients.drag.oswald_efficiency)
    }

    /// Drag coefficient for a lift coefficient and configuration.
    pub fn drag_coefficient(
        &self,
        c_l: f64,
        alpha: f64,
        height_agl: f64,
        controls: &ControlDeflections,
    ) -> f64 {
        let drag = &self.coefficients.drag;
        let ground_effect =
            ground_effect_factor(height_agl, self.geometry.wing_span, &self.ground_effect);

        drag.c_d_0
            + self.induced_drag_factor() * c_l * c_l * ground_effect
            + drag.c_d_alpha2 * alpha * alpha
            + drag.c_d_flap * controls.flaps
            + drag.c_d_deltae * controls.elevator.abs()
            + drag.c_d_deltaa * controls.aileron.abs()
            + drag.c_d_spoiler * controls.spoilers
            + drag.c_d_speed_brake * controls.speed_brake
            + drag.c_d_gear * controls.gear
    }

    /// Level-flight stall speed for a mass, air density and flap setting.
    pub fn stall_speed(&self, mass: f64, density: f64, flaps: f64) -> f64 {
        let denominator = density * self.geometry.wing_area * self.max_lift_coefficient(flaps);
        if denominator <= 0.0 {
            return 0.0;
        }
        (2.0 * mass * GRAVITY / denominator).sqrt()
    }

    /// Calculates aerodynamic forces and moments in the body frame.
    ///
    /// Coefficients are summed in the stability frame and the lift, drag and side force are
    /// rotated into body axes using α and β. Rate-damping terms use body rates normalized by
    /// `rate · reference / (2·V)` with V floored by [`AeroState::rate_reference_speed`].
    pub fn calculate_forces(
        &self,
        state: &AeroState,
        atmosphere: &AtmosphereProperties,
        controls: &ControlDeflections,
    ) -> AeroForces {
        let coeffs = &self.coefficients;
        let geometry = &self.geometry;
        let alpha = state.alpha;
        let beta = state.beta;

        let dynamic_pressure = 0.5 * atmosphere.density * state.airspeed * state.airspeed;

        let (p, q, r) = body_rates(&state.angular_velocity);
        let v_denom = 2.0 * state.rate_reference_speed();
        let p_hat = p * geometry.wing_span / v_denom;
        let q_hat = q * geometry.mac / v_denom;
        let r_hat = r * geometry.wing_span / v_denom;

        let c_l = self.lift_coefficient(alpha, controls);
        let c_d = self.drag_coefficient(c_l, alpha, state.height_agl, controls);

        let c_y = coeffs.side_force.c_y_beta * beta + coeffs.side_force.c_y_deltar * controls.rudder;

        let c_roll = coeffs.roll.c_l_beta * beta
            + coeffs.roll.c_l_p * p_hat
            + coeffs.roll.c_l_r * r_hat
            + coeffs.roll.c_l_deltaa * controls.aileron
            + coeffs.roll.c_l_deltar * controls.rudder;

        let c_m = coeffs.pitch.c_m_0
            + coeffs.pitch.c_m_alpha * alpha
            + coeffs.pitch.c_m_q * q_hat
            + coeffs.pitch.c_m_deltae * controls.elevator
            + coeffs.pitch.c_m_flap * controls.flaps;

        let c_n = coeffs.yaw.c_n_beta * beta
            + coeffs.yaw.c_n_p * p_hat
            + coeffs.yaw.c_n_r * r_hat
            + coeffs.yaw.c_n_deltaa * controls.aileron
            + coeffs.yaw.c_n_deltar * controls.rudder;

        let qs = dynamic_pressure * geometry.wing_area;
        let lift = qs * c_l;
        let drag = qs * c_d;
        let side_force = qs * c_y;

        let (sin_a, cos_a) = alpha.sin_cos();
        let (sin_b, cos_b) = beta.sin_cos();
        let velocity_axis = Vector3::new(cos_a * cos_b, -sin_a * cos_b, sin_b);
        let lift_axis = Vector3::new(sin_a, cos_a, 0.0);
        let side_axis = Vector3::new(-sin_b * cos_a, sin_b * sin_a, cos_b);

        let forces = lift_axis * lift - velocity_axis * drag + side_axis * side_force;
        let moments = moment_from_axes(
            qs * geometry.wing_span * c_roll,
            qs * geometry.mac * c_m,
            qs * geometry.wing_span * c_n,
        );

        AeroForces {
            forces,
            moments,
            lift,
            drag,
            side_force,
            dynamic_pressure,
            coefficients: AeroCoefficientValues {
                c_l,
                c_d,
                c_y,
                c_roll,
                c_m,
                c_n,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AircraftConfig;
    use crate::resources::Atmosphere;
    use approx::assert_relative_eq;

    fn c172() -> Aerodynamics {
        let config = AircraftConfig::cessna_172();
        Aerodynamics::new(config.geometry, config.aero_coef, config.ground_effect)
    }

    fn cruise_state(alpha: f64) -> AeroState {
        AeroState {
            airspeed: 55.0,
            alpha,
            beta: 0.0,
            angular_velocity: Vector3::zeros(),
            height_agl: 1000.0,
        }
    }

    #[test]
    fn test_lift_symmetry_at_zero_alpha() {
        let aero = c172();
        let controls = ControlDeflections::default();
        assert_eq!(aero.lift_coefficient(0.0, &controls), aero.coefficients().lift.c_l_0);
    }

    #[test]
    fn test_stall_boundary() {
        let aero = c172();
        let controls = ControlDeflections::default();
        let stall = aero.coefficients().stall;
        let cl_max = aero.max_lift_coefficient(0.0);

        let below = stall.alpha_stall - 1e-6;
        assert_eq!(
            aero.lift_coefficient(below, &controls),
            aero.linear_lift_coefficient(below, &controls)
        );

        let end = stall.alpha_stall + stall.stall_transition;
        let floor = stall.post_stall_floor * cl_max;
        let bound = (stall.peak_retention - stall.post_stall_floor) * cl_max + 1e-9;
        assert!((aero.lift_coefficient(end, &controls) - floor).abs() <= bound);
    }

    #[test]
    fn test_zero_airspeed_gives_zero_force() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let mut state = cruise_state(0.0);
        state.airspeed = 0.0;
        state.angular_velocity = Vector3::new(0.5, -0.2, 0.3);

        let result = aero.calculate_forces(&state, &atmosphere, &ControlDeflections::default());
        assert_eq!(result.forces, Vector3::zeros());
        assert_eq!(result.moments, Vector3::zeros());
        assert!(result.coefficients.c_roll.is_finite());
    }

    #[test]
    fn test_lift_points_up_and_drag_backward() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let result = aero.calculate_forces(
            &cruise_state(0.0),
            &atmosphere,
            &ControlDeflections::default(),
        );
        assert!(result.forces.y > 0.0);
        assert!(result.forces.x < 0.0);
        assert_relative_eq!(result.forces.y, result.lift, epsilon = 1e-9);
        assert_relative_eq!(-result.forces.x, result.drag, epsilon = 1e-9);
        assert_relative_eq!(result.forces.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stability_frame_rotation_preserves_magnitude() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let mut state = cruise_state(0.15);
        state.beta = 0.05;
        let result = aero.calculate_forces(&state, &atmosphere, &ControlDeflections::default());

        let expected = (result.lift.powi(2) + result.drag.powi(2) + result.side_force.powi(2)).sqrt();
        assert_relative_eq!(result.forces.norm(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_control_moment_signs() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let state = cruise_state(0.0);
        let neutral = aero.calculate_forces(&state, &atmosphere, &ControlDeflections::default());

        let aileron = ControlDeflections {
            aileron: 1.0,
            ..Default::default()
        };
        let result = aero.calculate_forces(&state, &atmosphere, &aileron);
        assert!(result.moments.x > neutral.moments.x, "right aileron rolls right");

        let elevator = ControlDeflections {
            elevator: 1.0,
            ..Default::default()
        };
        let result = aero.calculate_forces(&state, &atmosphere, &elevator);
        assert!(result.moments.z > neutral.moments.z, "up elevator pitches nose up");

        let rudder = ControlDeflections {
            rudder: 1.0,
            ..Default::default()
        };
        let result = aero.calculate_forces(&state, &atmosphere, &rudder);
        assert!(result.moments.y < neutral.moments.y, "right rudder yaws nose right");
    }

    #[test]
    fn test_rate_damping_opposes_rotation() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let mut state = cruise_state(0.0);
        state.angular_velocity = Vector3::new(0.5, 0.0, 0.0);
        let result = aero.calculate_forces(&state, &atmosphere, &ControlDeflections::default());
        assert!(result.moments.x < 0.0);
    }

    #[test]
    fn test_ground_effect_reduces_drag() {
        let aero = c172();
        let atmosphere = Atmosphere::default().properties(0.0);
        let high = aero.calculate_forces(&cruise_state(0.1), &atmosphere, &ControlDeflections::default());
        let mut low_state = cruise_state(0.1);
        low_state.height_agl = 1.0;
        let low = aero.calculate_forces(&low_state, &atmosphere, &ControlDeflections::default());
        assert!(low.drag < high.drag);
        assert_relative_eq!(low.lift, high.lift);
    }

    #[test]
    fn test_stall_speed() {
        let aero = c172();
        let stall_clean = aero.stall_speed(1111.0, 1.225, 0.0);
        let stall_flaps = aero.stall_speed(1111.0, 1.225, 1.0);
        assert!(stall_clean > 20.0 && stall_clean < 30.0);
        assert!(stall_flaps < stall_clean);
        assert_eq!(aero.stall_speed(1111.0, 0.0, 0.0), 0.0);
    }
}
