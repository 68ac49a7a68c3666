//! Error types for the dogpark-agents crate.
//!
//! Illegal state transitions (carrying two toys, picking up a tree, dropping
//! a toy that is already on the ground) are reported as typed errors rather
//! than silently flipping state.

use dogpark_types::AgentId;

use crate::park_object::ObjectKind;

/// Errors that can occur during agent state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The dog already holds a toy and cannot take another.
    #[error("dog is already carrying toy {toy}")]
    AlreadyCarrying {
        /// The toy currently held.
        toy: AgentId,
    },

    /// Only toys can be carried.
    #[error("a {kind} cannot be carried")]
    NotCarryable {
        /// The kind of the object that was picked up.
        kind: ObjectKind,
    },

    /// The toy is already being carried.
    #[error("toy is already being carried")]
    AlreadyCarried,

    /// The toy is on the ground, so it cannot be put down.
    #[error("toy is not being carried")]
    NotCarried,

    /// The dog energy range is empty.
    #[error("invalid dog energy range: min {min} > max {max}")]
    InvalidEnergyRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },

    /// No image tags are configured to choose from.
    #[error("no dog image tags configured")]
    NoImageTags,
}
