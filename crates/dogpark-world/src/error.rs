//! Error types for the `dogpark-world` crate.
//!
//! All fallible grid operations return [`GridError`]. Stacking several
//! occupants on one cell is not an error; blocking is a behavioural rule
//! applied by callers.

use dogpark_types::{AgentId, Cell};

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid must have at least one column and one row.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The cell lies outside the grid.
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// The agent is already placed on the grid.
    #[error("agent {agent} is already on the grid at {cell}")]
    AlreadyPlaced {
        /// The agent.
        agent: AgentId,
        /// Where it currently is.
        cell: Cell,
    },

    /// The agent is not on the grid.
    #[error("agent {0} is not on the grid")]
    NotOnGrid(AgentId),
}
