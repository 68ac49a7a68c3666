//! Stationary park objects: trees, food bowls, and toys.
//!
//! A park object is either **on the ground** (it has a grid position) or
//! **carried** (it has none, and a dog holds its id). Only toys ever enter the
//! carried state. Food bowls are consumed whole; the world replaces them.

use dogpark_types::{AgentKind, DisplayKind};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// The kind of a stationary park object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Blocks movement; never moves, never consumed.
    Tree,
    /// Consumed by an adjacent dog, then replaced elsewhere.
    FoodBowl,
    /// Picked up, carried, and dropped by dogs.
    Toy,
}

impl ObjectKind {
    /// The grid-level kind for this object.
    pub const fn agent_kind(self) -> AgentKind {
        match self {
            Self::Tree => AgentKind::Tree,
            Self::FoodBowl => AgentKind::FoodBowl,
            Self::Toy => AgentKind::Toy,
        }
    }

    /// The object kind behind a grid-level kind, if it is an object at all.
    pub const fn from_agent_kind(kind: AgentKind) -> Option<Self> {
        match kind {
            AgentKind::Dog => None,
            AgentKind::Tree => Some(Self::Tree),
            AgentKind::FoodBowl => Some(Self::FoodBowl),
            AgentKind::Toy => Some(Self::Toy),
        }
    }
}

impl core::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.agent_kind().fmt(f)
    }
}

/// Life-state of a park object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    /// Lying on a grid cell.
    OnGround,
    /// Held by a dog; off the grid.
    Carried,
}

/// What a park object did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTurn {
    /// Nothing to do; objects never act on their own.
    Idle,
    /// A carried toy skips its turn outright.
    SkippedWhileCarried,
}

/// A stationary entity in the park.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkObject {
    kind: ObjectKind,
    being_carried: bool,
}

impl ParkObject {
    /// Create an on-ground object of the given kind.
    pub const fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            being_carried: false,
        }
    }

    /// The object's kind.
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Whether a dog currently holds this object.
    pub const fn is_carried(&self) -> bool {
        self.being_carried
    }

    /// Current life-state.
    pub const fn state(&self) -> ObjectState {
        if self.being_carried {
            ObjectState::Carried
        } else {
            ObjectState::OnGround
        }
    }

    /// On-Ground -> Carried.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotCarryable`] for trees and food bowls, or
    /// [`AgentError::AlreadyCarried`] if the toy is already held.
    pub const fn pick_up(&mut self) -> Result<(), AgentError> {
        if !matches!(self.kind, ObjectKind::Toy) {
            return Err(AgentError::NotCarryable { kind: self.kind });
        }
        if self.being_carried {
            return Err(AgentError::AlreadyCarried);
        }
        self.being_carried = true;
        Ok(())
    }

    /// Carried -> On-Ground.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotCarried`] if the object is already on the
    /// ground.
    pub const fn put_down(&mut self) -> Result<(), AgentError> {
        if !self.being_carried {
            return Err(AgentError::NotCarried);
        }
        self.being_carried = false;
        Ok(())
    }

    /// Take this object's turn.
    pub const fn take_turn(&self) -> ObjectTurn {
        if self.being_carried {
            ObjectTurn::SkippedWhileCarried
        } else {
            ObjectTurn::Idle
        }
    }

    /// How a renderer should draw this object while it is on the ground.
    pub const fn display(&self) -> DisplayKind {
        match self.kind {
            ObjectKind::Tree => DisplayKind::Tree,
            ObjectKind::FoodBowl => DisplayKind::FoodBowl,
            ObjectKind::Toy => DisplayKind::Toy,
        }
    }
}
