//! Spatial grid for the Dog Park simulation.
//!
//! The park is a bounded rectangle of cells. Each cell holds zero or more
//! occupants at once; whether a dog may step onto a cell is a behavioural
//! rule (no dog, no tree) that the grid answers but does not enforce.
//!
//! # Modules
//!
//! - [`cell`] -- [`CellState`], the per-cell occupant bucket.
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`ParkGrid`]: placement, removal, relocation, Moore
//!   neighbourhood queries, and emptiness tests.
//!
//! [`CellState`]: cell::CellState
//! [`ParkGrid`]: grid::ParkGrid

pub mod cell;
pub mod error;
pub mod grid;

// Re-export primary types at crate root.
pub use cell::CellState;
pub use error::GridError;
pub use grid::ParkGrid;
