//! Shared type definitions for the Dog Park simulation.
//!
//! Types defined here flow to every other crate in the workspace and, via
//! `ts-rs`, to `TypeScript` for whatever front-end renders the park.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential identifier wrapper for agents
//! - [`enums`] -- Agent kinds and render display classification
//! - [`structs`] -- Grid cells, population counters, and the render snapshot

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AgentKind, DisplayKind};
pub use ids::AgentId;
pub use structs::{Cell, ParkSnapshot, PopulationStats, RenderEntity};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the snapshot types.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();
        let _ = crate::enums::AgentKind::export_all();
        let _ = crate::enums::DisplayKind::export_all();
        let _ = crate::structs::Cell::export_all();
        let _ = crate::structs::PopulationStats::export_all();
        let _ = crate::structs::RenderEntity::export_all();
        let _ = crate::structs::ParkSnapshot::export_all();
    }
}
