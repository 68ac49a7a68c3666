//! The per-step cycle.
//!
//! Each call to [`World::step`] runs three phases in order:
//!
//! 1. **Clock** -- advance the step counter.
//! 2. **Activation** -- snapshot the scheduled agents, shuffle the snapshot,
//!    and give every agent still registered its turn. Dogs perceive their
//!    Moore neighbourhood, decide, and the world resolves the decision.
//! 3. **Arrival** -- roll against `arrival_rate` and admit at most one dog at
//!    the entrance.
//!
//! Agents created during activation (replacement food bowls) are not in the
//! snapshot, and a dog admitted in phase 3 acts for the first time on the
//! next step. Agents removed during activation are skipped, not errors.

use dogpark_agents::{Agent, Dog, DogAction, ParkObject};
use dogpark_types::{AgentId, AgentKind, Cell};
use rand::Rng;
use tracing::{debug, info, trace};

use crate::clock::ClockError;
use crate::world::{ArrivalOutcome, World, WorldError};

/// Errors that abort a step.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The step counter overflowed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A world mutation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// What happened during one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The step number that was executed (1-based).
    pub step: u64,
    /// Agents that took a turn.
    pub activated: u32,
    /// Agents in the snapshot that were removed before their turn.
    pub skipped: u32,
    /// Outcome of the arrival phase.
    pub arrival: ArrivalOutcome,
    /// Food bowls consumed.
    pub bowls_eaten: u32,
    /// Toys picked up.
    pub toys_picked_up: u32,
    /// Toys put back on the ground.
    pub toys_dropped: u32,
    /// Dogs that left the park.
    pub dogs_exited: u32,
    /// Dogs in the park at the end of the step.
    pub dogs_present: u32,
}

impl TickSummary {
    const fn new(step: u64) -> Self {
        Self {
            step,
            activated: 0,
            skipped: 0,
            arrival: ArrivalOutcome::NoArrival,
            bowls_eaten: 0,
            toys_picked_up: 0,
            toys_dropped: 0,
            dogs_exited: 0,
            dogs_present: 0,
        }
    }
}

const fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}

impl World {
    /// Advance the simulation by one step.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] if the clock overflows or a world mutation
    /// fails (for example a replacement food bowl finds no empty cell).
    pub fn step(&mut self) -> Result<TickSummary, TickError> {
        // Phase 1: Clock
        let step = self.clock.advance()?;
        let mut summary = TickSummary::new(step);

        // Phase 2: Activation
        let order = self.scheduler.activation_order(&mut self.rng);
        for id in order {
            match self.scheduler.get(id) {
                None => {
                    trace!(step, agent = %id, "removed earlier this step, skipped");
                    bump(&mut summary.skipped);
                }
                Some(Agent::Object(object)) => {
                    let turn = object.take_turn();
                    trace!(step, agent = %id, kind = %object.kind(), ?turn, "object activated");
                    bump(&mut summary.activated);
                }
                Some(Agent::Dog(_)) => {
                    self.dog_turn(id, &mut summary)?;
                    bump(&mut summary.activated);
                }
            }
        }

        // Phase 3: Arrival
        summary.arrival = self.arrival_phase()?;
        summary.dogs_present = self.current_dogs;

        debug!(
            step,
            activated = summary.activated,
            skipped = summary.skipped,
            arrival = ?summary.arrival,
            bowls_eaten = summary.bowls_eaten,
            toys_picked_up = summary.toys_picked_up,
            toys_dropped = summary.toys_dropped,
            dogs_exited = summary.dogs_exited,
            dogs_present = summary.dogs_present,
            "Step completed"
        );
        Ok(summary)
    }

    fn arrival_phase(&mut self) -> Result<ArrivalOutcome, WorldError> {
        let rate = self.config.population.arrival_rate;
        if !self.rng.random_bool(rate) {
            return Ok(ArrivalOutcome::NoArrival);
        }
        let outcome = self.admit_dog()?;
        if outcome == ArrivalOutcome::PopulationCapReached {
            trace!(step = self.clock.step(), "Arrival skipped, population cap reached");
        }
        Ok(outcome)
    }

    // -------------------------------------------------------------------
    // Dog turns
    // -------------------------------------------------------------------

    fn dog_turn(&mut self, id: AgentId, summary: &mut TickSummary) -> Result<(), WorldError> {
        let here = self.grid.position_of(id).ok_or(WorldError::AgentMissing(id))?;
        let surroundings = self.surroundings(here)?;
        let exit = self.exit_cell();
        let action = {
            let dog = self
                .scheduler
                .get(id)
                .and_then(Agent::as_dog)
                .ok_or(WorldError::AgentMissing(id))?;
            dog.decide(here, &surroundings, exit, &mut self.rng)
        };

        match action {
            DogAction::Eat { bowl, at } => self.resolve_eat(id, bowl, at, summary)?,
            DogAction::PickUp { toy } => self.resolve_pick_up(id, toy, summary)?,
            DogAction::Wander { to } => {
                self.grid.move_agent(id, to)?;
                trace!(agent = %id, from = %here, %to, "Dog wandered");
            }
            DogAction::Stay => {}
            DogAction::ApproachExit { to } => {
                self.drop_toy(id, here, summary)?;
                self.grid.move_agent(id, to)?;
                debug!(agent = %id, from = %here, exit = %to, "Dog heading out");
            }
            DogAction::Leave => {
                self.drop_toy(id, here, summary)?;
                let dog = self.remove_dog(id)?;
                bump(&mut summary.dogs_exited);
                info!(
                    agent = %id,
                    name = dog.name(),
                    at = %here,
                    via_exit = here == exit,
                    "Dog left the park"
                );
            }
        }

        if action.spends_energy() {
            self.dog_mut(id)?.spend_energy();
        }
        Ok(())
    }

    fn resolve_eat(
        &mut self,
        id: AgentId,
        bowl: AgentId,
        at: Cell,
        summary: &mut TickSummary,
    ) -> Result<(), WorldError> {
        self.grid.remove(bowl)?;
        self.scheduler.remove(bowl);
        self.grid.move_agent(id, at)?;
        bump(&mut summary.bowls_eaten);
        debug!(agent = %id, %bowl, %at, "Dog ate from a food bowl");

        self.drop_toy(id, at, summary)?;
        let replacement = self.add_food_bowl()?;
        debug!(eaten = %bowl, %replacement, "Food bowl replenished");
        Ok(())
    }

    fn resolve_pick_up(
        &mut self,
        id: AgentId,
        toy: AgentId,
        summary: &mut TickSummary,
    ) -> Result<(), WorldError> {
        self.object_mut(toy)?
            .pick_up()
            .map_err(|source| WorldError::Agent {
                agent_id: toy,
                source,
            })?;
        self.dog_mut(id)?
            .take_toy(toy)
            .map_err(|source| WorldError::Agent {
                agent_id: id,
                source,
            })?;
        let from = self.grid.remove(toy)?.0;
        bump(&mut summary.toys_picked_up);
        debug!(agent = %id, %toy, %from, "Dog picked up a toy");
        Ok(())
    }

    /// Put the dog's toy, if any, back on the ground at `at`.
    fn drop_toy(&mut self, id: AgentId, at: Cell, summary: &mut TickSummary) -> Result<(), WorldError> {
        let Some(toy) = self.dog_mut(id)?.release_toy() else {
            return Ok(());
        };
        self.object_mut(toy)?
            .put_down()
            .map_err(|source| WorldError::Agent {
                agent_id: toy,
                source,
            })?;
        self.grid.place(toy, AgentKind::Toy, at)?;
        bump(&mut summary.toys_dropped);
        debug!(agent = %id, %toy, %at, "Dog dropped a toy");
        Ok(())
    }

    fn dog_mut(&mut self, id: AgentId) -> Result<&mut Dog, WorldError> {
        self.scheduler
            .get_mut(id)
            .and_then(Agent::as_dog_mut)
            .ok_or(WorldError::AgentMissing(id))
    }

    fn object_mut(&mut self, id: AgentId) -> Result<&mut ParkObject, WorldError> {
        self.scheduler
            .get_mut(id)
            .and_then(Agent::as_object_mut)
            .ok_or(WorldError::AgentMissing(id))
    }
}
