use crate::components::FuelPlanning;
use crate::utils::FUEL_EPSILON;

/// Fuel left after burning `fuel_flow` for `dt`. Never negative; residues below
/// [`FUEL_EPSILON`] count as empty.
pub fn burn_fuel(fuel_mass: f64, fuel_flow: f64, dt: f64) -> f64 {
    let remaining = fuel_mass - fuel_flow.max(0.0) * dt;
    if remaining < FUEL_EPSILON {
        0.0
    } else {
        remaining
    }
}

/// Endurance and range at the current burn rate and ground speed.
pub fn fuel_planning(
    fuel_mass: f64,
    fuel_flow: f64,
    max_fuel_mass: f64,
    ground_speed: f64,
) -> FuelPlanning {
    let endurance = if fuel_flow > 0.0 {
        fuel_mass / fuel_flow
    } else {
        f64::INFINITY
    };
    let range = if ground_speed > 0.0 {
        endurance * ground_speed
    } else {
        0.0
    };
    let fuel_fraction = if max_fuel_mass > 0.0 {
        (fuel_mass / max_fuel_mass).clamp(0.0, 1.0)
    } else {
        0.0
    };

    FuelPlanning {
        fuel_mass,
        fuel_flow,
        endurance,
        range,
        fuel_fraction,
    }
}
