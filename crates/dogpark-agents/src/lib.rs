//! Dogs, park objects, and their turn logic for the Dog Park simulation.
//!
//! This crate holds agent state and the rules agents follow, without owning
//! the grid or the schedule. The world (in `dogpark-core`) builds each dog's
//! [`Surroundings`], asks it to [`decide`](Dog::decide), and applies the
//! resulting [`DogAction`].
//!
//! # Modules
//!
//! - [`agent`] -- The closed [`Agent`] variant set.
//! - [`config`] -- Arrival parameters for new dogs ([`DogConfig`]).
//! - [`dog`] -- Dog state and the active/departing decision rules.
//! - [`error`] -- Error types for agent operations ([`AgentError`]).
//! - [`park_object`] -- Trees, food bowls, and toys with carry transitions.
//! - [`surroundings`] -- A dog's view of its Moore neighbourhood.

pub mod agent;
pub mod config;
pub mod dog;
pub mod error;
pub mod park_object;
pub mod surroundings;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::DogConfig;
pub use dog::{Dog, DogAction, DogState};
pub use error::AgentError;
pub use park_object::{ObjectKind, ObjectState, ObjectTurn, ParkObject};
pub use surroundings::{NeighborView, Surroundings};
