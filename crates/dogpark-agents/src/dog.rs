//! Dogs: energy, carried toy, and the per-turn decision rule.
//!
//! A dog is **Active** while it has energy and **Departing** once it has none.
//! Each turn the world hands the dog its [`Surroundings`]; the dog returns a
//! [`DogAction`] and the world carries it out.
//!
//! Active turn, in priority order:
//!
//! 1. Eat the first reachable food bowl next to it (moving onto its cell).
//! 2. Otherwise, if paws are free, pick up the first neighbouring toy.
//! 3. Otherwise wander to a uniformly random open neighbour, or stay put.
//!
//! Departing turn: leave from the exit cell, step onto an adjacent open exit
//! cell, or slip out at once when the exit is out of reach.

use dogpark_types::{AgentId, Cell, DisplayKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::DogConfig;
use crate::error::AgentError;
use crate::surroundings::Surroundings;

/// Life-state of a dog still in the park.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogState {
    /// Energy left; eats, plays, wanders.
    Active,
    /// Out of energy; heading home.
    Departing,
}

/// The action a dog chose for its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogAction {
    /// Move onto `at` and eat the bowl there.
    Eat {
        /// The bowl to consume.
        bowl: AgentId,
        /// The bowl's cell.
        at: Cell,
    },
    /// Pick up a neighbouring toy without moving.
    PickUp {
        /// The toy to take.
        toy: AgentId,
    },
    /// Step to an open neighbouring cell.
    Wander {
        /// Destination.
        to: Cell,
    },
    /// No open neighbour; stay in place.
    Stay,
    /// Departing: step onto the adjacent exit cell.
    ApproachExit {
        /// The exit cell.
        to: Cell,
    },
    /// Departing: leave the park this turn.
    Leave,
}

impl DogAction {
    /// Whether the action costs a unit of energy (every active-state action
    /// does).
    pub const fn spends_energy(self) -> bool {
        !matches!(self, Self::ApproachExit { .. } | Self::Leave)
    }
}

/// A dog in the park.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    name: String,
    energy: u32,
    image_tag: String,
    carried_toy: Option<AgentId>,
}

impl Dog {
    /// Create a dog with explicit attributes.
    pub const fn new(name: String, energy: u32, image_tag: String) -> Self {
        Self {
            name,
            energy,
            image_tag,
            carried_toy: None,
        }
    }

    /// Create an arriving dog with random energy and image tag.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if `config` fails validation.
    pub fn arrive<R: Rng + ?Sized>(
        name: String,
        config: &DogConfig,
        rng: &mut R,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        let energy = rng.random_range(config.min_energy..=config.max_energy);
        let idx = rng.random_range(0..config.image_tags.len());
        let image_tag = config
            .image_tags
            .get(idx)
            .cloned()
            .ok_or(AgentError::NoImageTags)?;
        Ok(Self::new(name, energy, image_tag))
    }

    /// Display name, `Dog_<n>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining energy.
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Opaque image tag for renderers.
    pub fn image_tag(&self) -> &str {
        &self.image_tag
    }

    /// The toy this dog holds, if any.
    pub const fn carried_toy(&self) -> Option<AgentId> {
        self.carried_toy
    }

    /// Whether the dog holds a toy.
    pub const fn is_carrying(&self) -> bool {
        self.carried_toy.is_some()
    }

    /// Current life-state.
    pub const fn state(&self) -> DogState {
        if self.energy > 0 {
            DogState::Active
        } else {
            DogState::Departing
        }
    }

    /// Take hold of a toy.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AlreadyCarrying`] if the dog already holds one.
    pub const fn take_toy(&mut self, toy: AgentId) -> Result<(), AgentError> {
        if let Some(held) = self.carried_toy {
            return Err(AgentError::AlreadyCarrying { toy: held });
        }
        self.carried_toy = Some(toy);
        Ok(())
    }

    /// Let go of the held toy, returning it.
    pub const fn release_toy(&mut self) -> Option<AgentId> {
        self.carried_toy.take()
    }

    /// Spend one unit of energy. Energy never drops below zero.
    pub const fn spend_energy(&mut self) {
        self.energy = self.energy.saturating_sub(1);
    }

    /// How a renderer should draw this dog.
    pub fn display(&self) -> DisplayKind {
        let image_tag = self.image_tag.clone();
        if self.is_carrying() {
            DisplayKind::DogWithToy { image_tag }
        } else {
            DisplayKind::Dog { image_tag }
        }
    }

    /// Choose this turn's action.
    ///
    /// `here` is the dog's cell, `surroundings` its Moore neighbourhood in
    /// scan order, and `exit` the park's exit cell. Randomness is only used
    /// to pick a wander destination.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        here: Cell,
        surroundings: &Surroundings,
        exit: Cell,
        rng: &mut R,
    ) -> DogAction {
        match self.state() {
            DogState::Active => self.decide_active(surroundings, rng),
            DogState::Departing => Self::decide_departing(here, surroundings, exit),
        }
    }

    fn decide_active<R: Rng + ?Sized>(&self, surroundings: &Surroundings, rng: &mut R) -> DogAction {
        if let Some((bowl, at)) = surroundings.first_reachable_bowl() {
            return DogAction::Eat { bowl, at };
        }

        if !self.is_carrying() {
            if let Some(toy) = surroundings.first_toy() {
                return DogAction::PickUp { toy };
            }
        }

        let open = surroundings.open_cells();
        if open.is_empty() {
            trace!(dog = %self.name, "boxed in, staying put");
            return DogAction::Stay;
        }
        let idx = rng.random_range(0..open.len());
        open.get(idx)
            .map_or(DogAction::Stay, |to| DogAction::Wander { to: *to })
    }

    fn decide_departing(here: Cell, surroundings: &Surroundings, exit: Cell) -> DogAction {
        if here == exit {
            return DogAction::Leave;
        }
        match surroundings.get(exit) {
            Some(view) if view.is_open() => DogAction::ApproachExit { to: exit },
            _ => DogAction::Leave,
        }
    }
}
