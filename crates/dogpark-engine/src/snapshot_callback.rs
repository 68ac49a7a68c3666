//! Tick callback that reports each step to the log.
//!
//! Step summaries go out at `debug`; the full render snapshot is serialized
//! to JSON at `trace` for external renderers tailing the log.

use dogpark_core::World;
use dogpark_core::runner::TickCallback;
use dogpark_core::tick::TickSummary;
use dogpark_types::ParkSnapshot;
use tracing::{debug, trace, warn};

/// Callback that logs summaries and keeps the latest snapshot.
#[derive(Debug, Default)]
pub struct SnapshotCallback {
    latest: Option<ParkSnapshot>,
}

impl SnapshotCallback {
    /// Create a callback with no snapshot yet.
    pub const fn new() -> Self {
        Self { latest: None }
    }

    /// The snapshot taken after the most recent step.
    pub const fn latest(&self) -> Option<&ParkSnapshot> {
        self.latest.as_ref()
    }
}

impl TickCallback for SnapshotCallback {
    fn on_tick(&mut self, summary: &TickSummary, world: &World) {
        let population = world.population();
        debug!(
            step = summary.step,
            dogs_present = summary.dogs_present,
            total_dogs_added = population.total_dogs_added,
            max_dogs = population.max_dogs,
            bowls_eaten = summary.bowls_eaten,
            toys_picked_up = summary.toys_picked_up,
            dogs_exited = summary.dogs_exited,
            "Step report"
        );

        let snapshot = world.snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => trace!(step = summary.step, snapshot = %json, "Park snapshot"),
            Err(err) => warn!(step = summary.step, %err, "Snapshot serialization failed"),
        }
        self.latest = Some(snapshot);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dogpark_agents::ObjectKind;
    use dogpark_core::ParkConfig;
    use dogpark_types::{Cell, DisplayKind};

    use super::*;

    #[test]
    fn keeps_latest_snapshot() {
        let mut world = World::new(ParkConfig::new(3, 3, 1, 0, 0, 0, 0.0)).unwrap();
        world.place_object(ObjectKind::Tree, Cell::new(2, 2)).unwrap();
        let mut cb = SnapshotCallback::new();
        assert!(cb.latest().is_none());

        let summary = world.step().unwrap();
        cb.on_tick(&summary, &world);

        let snapshot = cb.latest().unwrap();
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.entities.len(), 1);
        assert_eq!(
            snapshot.entities_at(Cell::new(2, 2)).next().map(|e| &e.display),
            Some(&DisplayKind::Tree)
        );
    }
}
