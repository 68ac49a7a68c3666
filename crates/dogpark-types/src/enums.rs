//! Enumeration types for the Dog Park simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The closed set of agent variants living in the park.
///
/// The grid records the kind next to every occupant so that blocking and
/// neighbourhood scans never need to consult the agent registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// A mobile dog.
    Dog,
    /// A stationary tree. Blocks dog movement.
    Tree,
    /// A food bowl. Consumed by an adjacent dog and replaced elsewhere.
    FoodBowl,
    /// A toy that dogs pick up, carry, and drop.
    Toy,
}

impl AgentKind {
    /// Whether an occupant of this kind prevents a dog from entering its cell.
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Dog | Self::Tree)
    }

    /// Whether this kind may be placed on the entrance row at creation.
    pub const fn allowed_on_entrance_row(self) -> bool {
        matches!(self, Self::Dog | Self::FoodBowl)
    }
}

impl core::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dog => write!(f, "dog"),
            Self::Tree => write!(f, "tree"),
            Self::FoodBowl => write!(f, "food_bowl"),
            Self::Toy => write!(f, "toy"),
        }
    }
}

/// How a rendering front-end should draw a positioned agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayKind {
    /// A dog drawn with its own image.
    Dog {
        /// Opaque image tag chosen when the dog arrived.
        image_tag: String,
    },
    /// A dog drawn with its image and a toy overlay.
    DogWithToy {
        /// Opaque image tag chosen when the dog arrived.
        image_tag: String,
    },
    /// A tree.
    Tree,
    /// A food bowl.
    FoodBowl,
    /// A toy lying on the ground.
    Toy,
}
