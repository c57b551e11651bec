mod air_data;
mod force_calculator;
mod ground_effect;
mod stall;

pub use air_data::{calculate_air_data, AeroState, AirDataValues};
pub use force_calculator::{AeroCoefficientValues, AeroForces, Aerodynamics};
pub use ground_effect::ground_effect_factor;
pub use stall::{is_stalled, stall_excess, stall_lift_coefficient};
