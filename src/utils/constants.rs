// Physical constants
pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const AIR_HEAT_CAPACITY_RATIO: f64 = 1.4;

// International Standard Atmosphere
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m
pub const ISA_TROPOPAUSE_ALTITUDE: f64 = 11000.0; // m
pub const ISA_STRATOPAUSE_LOWER_ALTITUDE: f64 = 20000.0; // m
pub const ISA_UPPER_STRATOSPHERE_LAPSE_RATE: f64 = 0.001; // K/m

// Sutherland's law for air
pub const SUTHERLAND_REFERENCE_VISCOSITY: f64 = 1.716e-5; // Pa·s
pub const SUTHERLAND_REFERENCE_TEMP: f64 = 273.15; // K
pub const SUTHERLAND_CONSTANT: f64 = 110.4; // K

// Timestep defaults
pub const DEFAULT_FIXED_TIMESTEP: f64 = 1.0 / 120.0;
pub const MAX_FRAME_TIME: f64 = 0.25; // Maximum frame time fed to the accumulator

// Numeric floors
pub const MIN_AIRSPEED: f64 = 0.5; // m/s, floor for rate damping ratios
pub const ROTATION_EPSILON: f64 = 1e-9; // rad, smallest rotation applied to the attitude
pub const FUEL_EPSILON: f64 = 1e-9; // kg

// Ground contact
pub const GROUND_CONTACT_HEIGHT: f64 = 0.1; // m above ground level
