//! Dog Park simulation binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `dogpark-config.yaml`
//! 3. Build the park
//! 4. Run the simulation loop
//! 5. Log the result

mod error;
mod snapshot_callback;

use std::path::Path;

use dogpark_core::runner::{self, RunBounds};
use dogpark_core::{ParkConfig, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::snapshot_callback::SnapshotCallback;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "dogpark-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, park construction, or the run fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("dogpark-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        width = config.park.width,
        height = config.park.height,
        seed = config.simulation.seed,
        max_steps = config.simulation.max_steps,
        tick_interval_ms = config.simulation.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Build the park.
    let bounds = RunBounds::from_config(&config.simulation);
    let mut world = World::new(config)?;

    // 4. Run.
    let mut callback = SnapshotCallback::new();
    let result = runner::run_simulation(&mut world, bounds, &mut callback).await?;

    // 5. Report.
    runner::log_simulation_end(&result);
    let population = world.population();
    info!(
        total_dogs_added = population.total_dogs_added,
        dogs_still_present = population.current_dogs,
        entities_on_grid = callback.latest().map_or(0, |s| s.entities.len()),
        "dogpark-engine finished"
    );
    Ok(())
}

/// Load `dogpark-config.yaml`, or fall back to defaults when it is absent.
fn load_config() -> Result<ParkConfig, EngineError> {
    Ok(ParkConfig::load_or_default(Path::new(CONFIG_PATH))?)
}
