use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use flyer_fdm::{
    components::{AircraftConfig, AircraftSource, AircraftType},
    resources::SimulationConfig,
    systems::FlightDynamics,
};

/// Runs one aircraft headless and streams its state as JSON lines on stdout.
#[derive(Parser, Debug)]
#[command(name = "flyer_fdm_run", version)]
struct Options {
    /// Aircraft YAML file, the built-in Cessna 172 when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated time (s)
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
    /// Throttle for every engine (0..1)
    #[arg(long, default_value_t = 1.0)]
    throttle: f64,
    /// Fixed physics rate (Hz)
    #[arg(long, default_value_t = 120.0)]
    rate: f64,
}

/// Log lines go to stderr so stdout stays a clean state stream. `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse();
    init_tracing();

    let source = match options.config {
        Some(path) => AircraftSource::File(path),
        None => AircraftSource::Programmed(AircraftType::Cessna172),
    };
    let aircraft = AircraftConfig::new(source)?;
    let settings = SimulationConfig::with_rate(options.rate);
    let step = settings.fixed_timestep;

    let mut dynamics = FlightDynamics::new(aircraft, settings)?;
    if !dynamics.start_engines() {
        bevy::log::warn!("Not every engine started");
    }
    dynamics.set_throttle(options.throttle);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let steps = (options.seconds / step).round().max(0.0) as usize;
    for _ in 0..steps {
        dynamics.update(step);
        serde_json::to_writer(&mut out, dynamics.state())?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
