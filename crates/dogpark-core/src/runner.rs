//! Bounded run loop around [`World::step`].
//!
//! [`run_simulation`] drives the world until one of:
//!
//! - **Step limit**: `max_steps` steps have completed (zero disables it).
//! - **Park emptied**: every dog the park will admit has arrived and left.
//!
//! Between steps the loop sleeps for `tick_interval_ms` so an external
//! renderer can keep up. A [`TickCallback`] sees every step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SimulationBoundsConfig;
use crate::tick::{TickError, TickSummary};
use crate::world::World;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Reason why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_steps` limit.
    MaxStepsReached,
    /// Every dog the park will admit has come and gone.
    ParkEmptied,
}

/// Limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Stop after this many steps; zero means no limit.
    pub max_steps: u64,
    /// Pause between steps in milliseconds.
    pub tick_interval_ms: u64,
}

impl RunBounds {
    /// Take the run limits from the `simulation` config section.
    pub const fn from_config(config: &SimulationBoundsConfig) -> Self {
        Self {
            max_steps: config.max_steps,
            tick_interval_ms: config.tick_interval_ms,
        }
    }

    const fn step_limit_reached(&self, step: u64) -> bool {
        self.max_steps > 0 && step >= self.max_steps
    }
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of steps executed by this run.
    pub total_steps: u64,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end of the run.
    pub ended_at: DateTime<Utc>,
}

/// Callback invoked after each step completes.
///
/// Renderers and loggers implement this to observe the park without
/// mutating it.
pub trait TickCallback: Send {
    /// Called after a step completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, world: &World);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails; the world is left as it was
/// when the failure occurred.
pub async fn run_simulation(
    world: &mut World,
    bounds: RunBounds,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let started_at = Utc::now();
    let mut total_steps: u64 = 0;

    info!(
        max_steps = bounds.max_steps,
        tick_interval_ms = bounds.tick_interval_ms,
        max_dogs = world.population().max_dogs,
        "Simulation starting"
    );

    loop {
        let summary = world.step()?;
        total_steps = total_steps.saturating_add(1);

        callback.on_tick(&summary, world);

        let end_reason = if world.is_emptied() {
            info!(step = summary.step, "Every dog has gone home");
            Some(SimulationEndReason::ParkEmptied)
        } else if bounds.step_limit_reached(total_steps) {
            info!(step = summary.step, max_steps = bounds.max_steps, "Step limit reached");
            Some(SimulationEndReason::MaxStepsReached)
        } else {
            None
        };

        if let Some(end_reason) = end_reason {
            return Ok(SimulationResult {
                end_reason,
                final_summary: Some(summary),
                total_steps,
                started_at,
                ended_at: Utc::now(),
            });
        }

        if bounds.tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(bounds.tick_interval_ms)).await;
        }
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    let elapsed_ms = result
        .ended_at
        .signed_duration_since(result.started_at)
        .num_milliseconds();
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        elapsed_ms,
        final_step = result.final_summary.as_ref().map(|s| s.step),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            step = summary.step,
            dogs_present = summary.dogs_present,
            "Final step summary"
        );
    } else {
        warn!("Simulation ended with no steps executed");
    }
}
