mod atmosphere;
mod config;

pub use atmosphere::{Atmosphere, AtmosphereProperties};
pub use config::{WeatherConfig, WindProfile};
