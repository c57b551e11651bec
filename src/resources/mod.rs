pub mod config;
pub mod environment;

pub use config::SimulationConfig;
pub use environment::{Atmosphere, AtmosphereProperties, WeatherConfig, WindProfile};
