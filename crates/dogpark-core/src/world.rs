//! The simulation world: grid, scheduler, RNG, and population counters.
//!
//! [`World`] owns all mutable simulation state. Dogs and park objects never
//! touch the grid or the scheduler directly; they describe what they want
//! (see [`DogAction`](dogpark_agents::DogAction)) and the world applies it.
//!
//! This module covers construction, object placement and replenishment, dog
//! admission, and the read-only query surface. The per-step cycle lives in
//! [`crate::tick`].

use dogpark_agents::{Agent, AgentError, Dog, NeighborView, ObjectKind, ParkObject, Surroundings};
use dogpark_types::{
    AgentId, AgentKind, Cell, ParkSnapshot, PopulationStats, RenderEntity,
};
use dogpark_world::{GridError, ParkGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::clock::StepClock;
use crate::config::{ConfigError, ParkConfig};
use crate::scheduler::Scheduler;

/// Errors raised by world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A grid operation failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// An agent state transition failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent whose transition failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// No empty cell was found for a new object within the attempt budget.
    /// Either the object counts are too high for the grid size, or dogs
    /// standing on the remaining objects leave no cell fully empty.
    #[error("no empty cell for a new {kind} after {attempts} attempts; park too crowded for its size")]
    GridSaturated {
        /// The kind being placed.
        kind: AgentKind,
        /// Attempts made.
        attempts: u32,
    },

    /// Trees and toys may not be placed on the entrance row.
    #[error("a {kind} may not be placed on the entrance row at {cell}")]
    ReservedRow {
        /// The kind being placed.
        kind: AgentKind,
        /// The requested cell.
        cell: Cell,
    },

    /// An agent expected to exist was not registered or not positioned.
    #[error("agent {0} is missing from the world")]
    AgentMissing(AgentId),

    /// The agent id sequence is exhausted.
    #[error("agent id space exhausted")]
    IdsExhausted,
}

/// Result of an arrival attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// The arrival roll failed; nobody came.
    NoArrival,
    /// A dog was admitted at the entrance.
    Admitted(AgentId),
    /// The configured maximum has already been admitted.
    PopulationCapReached,
}

/// The dog park.
#[derive(Debug)]
pub struct World {
    pub(crate) config: ParkConfig,
    pub(crate) grid: ParkGrid,
    pub(crate) scheduler: Scheduler,
    pub(crate) rng: StdRng,
    pub(crate) clock: StepClock,
    pub(crate) next_id: AgentId,
    pub(crate) current_dogs: u32,
    pub(crate) total_dogs_added: u32,
    pub(crate) entrance: Cell,
}

impl World {
    /// Build a park from configuration: validate it, seed the RNG from
    /// `simulation.seed`, then place trees, food bowls, and toys at random
    /// empty cells (trees and toys above the entrance row).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Config`] for an invalid configuration, or
    /// [`WorldError::GridSaturated`] if an object cannot be placed.
    pub fn new(config: ParkConfig) -> Result<Self, WorldError> {
        let rng = StdRng::seed_from_u64(config.simulation.seed);
        Self::with_rng(config, rng)
    }

    /// Build a park with an explicitly supplied RNG. `simulation.seed` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Same as [`World::new`].
    pub fn with_rng(config: ParkConfig, rng: StdRng) -> Result<Self, WorldError> {
        config.validate()?;
        let grid = ParkGrid::new(config.park.width, config.park.height)?;
        let entrance = Cell::new(config.park.width.checked_div(2).unwrap_or(0), 0);

        let mut world = Self {
            config,
            grid,
            scheduler: Scheduler::new(),
            rng,
            clock: StepClock::new(),
            next_id: AgentId::new(0),
            current_dogs: 0,
            total_dogs_added: 0,
            entrance,
        };

        let objects = world.config.objects;
        for _ in 0..objects.trees {
            world.add_tree()?;
        }
        for _ in 0..objects.food_bowls {
            world.add_food_bowl()?;
        }
        for _ in 0..objects.toys {
            world.add_toy()?;
        }

        info!(
            width = world.grid.width(),
            height = world.grid.height(),
            trees = objects.trees,
            food_bowls = objects.food_bowls,
            toys = objects.toys,
            max_dogs = world.config.population.max_dogs,
            arrival_rate = world.config.population.arrival_rate,
            "Park opened"
        );
        Ok(world)
    }

    // -------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------

    fn issue_id(&mut self) -> Result<AgentId, WorldError> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(WorldError::IdsExhausted)?;
        Ok(id)
    }

    // -------------------------------------------------------------------
    // Object placement
    // -------------------------------------------------------------------

    /// Place a new food bowl at a random empty cell anywhere on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridSaturated`] if no empty cell turns up
    /// within `simulation.max_placement_attempts`.
    pub fn add_food_bowl(&mut self) -> Result<AgentId, WorldError> {
        self.place_at_random(ObjectKind::FoodBowl)
    }

    /// Place a new tree at a random empty cell above the entrance row.
    ///
    /// # Errors
    ///
    /// See [`World::add_food_bowl`].
    pub fn add_tree(&mut self) -> Result<AgentId, WorldError> {
        self.place_at_random(ObjectKind::Tree)
    }

    /// Place a new toy at a random empty cell above the entrance row.
    ///
    /// # Errors
    ///
    /// See [`World::add_food_bowl`].
    pub fn add_toy(&mut self) -> Result<AgentId, WorldError> {
        self.place_at_random(ObjectKind::Toy)
    }

    fn place_at_random(&mut self, kind: ObjectKind) -> Result<AgentId, WorldError> {
        let agent_kind = kind.agent_kind();
        let min_row = u32::from(!agent_kind.allowed_on_entrance_row());
        let (width, height) = (self.grid.width(), self.grid.height());
        let attempts = self.config.simulation.max_placement_attempts;

        for _ in 0..attempts {
            let cell = Cell::new(
                self.rng.random_range(0..width),
                self.rng.random_range(min_row..height),
            );
            if self.grid.is_empty(cell)? {
                return self.spawn_object(kind, cell);
            }
        }
        Err(WorldError::GridSaturated {
            kind: agent_kind,
            attempts,
        })
    }

    /// Place a new object at a specific cell. The cell may be occupied;
    /// trees and toys may not go on the entrance row.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ReservedRow`] for a tree or toy on row 0, or
    /// [`WorldError::Grid`] if the cell is outside the grid.
    pub fn place_object(&mut self, kind: ObjectKind, cell: Cell) -> Result<AgentId, WorldError> {
        let agent_kind = kind.agent_kind();
        if cell.y == 0 && !agent_kind.allowed_on_entrance_row() {
            return Err(WorldError::ReservedRow {
                kind: agent_kind,
                cell,
            });
        }
        if !self.grid.contains(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                width: self.grid.width(),
                height: self.grid.height(),
            }
            .into());
        }
        self.spawn_object(kind, cell)
    }

    fn spawn_object(&mut self, kind: ObjectKind, cell: Cell) -> Result<AgentId, WorldError> {
        let id = self.issue_id()?;
        self.grid.place(id, kind.agent_kind(), cell)?;
        self.scheduler.add(id, ParkObject::new(kind).into());
        debug!(agent = %id, kind = %kind, %cell, "Object placed");
        Ok(id)
    }

    // -------------------------------------------------------------------
    // Dogs
    // -------------------------------------------------------------------

    /// Admit one dog at the entrance unless the population cap is reached.
    /// Reaching the cap is an outcome, not an error.
    ///
    /// The entrance is the one cell where a newcomer may join a dog already
    /// standing there. Moving dogs still treat a dog-occupied cell as
    /// blocked.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] only if the grid or id sequence fails.
    pub fn admit_dog(&mut self) -> Result<ArrivalOutcome, WorldError> {
        if self.total_dogs_added >= self.config.population.max_dogs {
            return Ok(ArrivalOutcome::PopulationCapReached);
        }
        let name = format!("Dog_{}", self.total_dogs_added);
        let dog = Dog::arrive(name, &self.config.dogs, &mut self.rng).map_err(|source| {
            WorldError::Agent {
                agent_id: self.next_id,
                source,
            }
        })?;
        let id = self.issue_id()?;
        self.grid.place(id, AgentKind::Dog, self.entrance)?;
        info!(
            agent = %id,
            name = dog.name(),
            energy = dog.energy(),
            image_tag = dog.image_tag(),
            "Dog arrived"
        );
        self.scheduler.add(id, dog.into());
        self.total_dogs_added = self.total_dogs_added.saturating_add(1);
        self.current_dogs = self.current_dogs.saturating_add(1);
        Ok(ArrivalOutcome::Admitted(id))
    }

    /// Take a dog off the grid and out of the scheduler.
    pub(crate) fn remove_dog(&mut self, id: AgentId) -> Result<Dog, WorldError> {
        match self.scheduler.remove(id) {
            Some(Agent::Dog(dog)) => {
                self.grid.remove(id)?;
                self.current_dogs = self.current_dogs.saturating_sub(1);
                Ok(dog)
            }
            Some(other) => {
                self.scheduler.add(id, other);
                Err(WorldError::AgentMissing(id))
            }
            None => Err(WorldError::AgentMissing(id)),
        }
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// The configuration the park was built from.
    pub const fn config(&self) -> &ParkConfig {
        &self.config
    }

    /// The grid.
    pub const fn grid(&self) -> &ParkGrid {
        &self.grid
    }

    /// The scheduler (read-only).
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Ids of all scheduled agents, ascending.
    pub fn scheduled_ids(&self) -> Vec<AgentId> {
        self.scheduler.ids()
    }

    /// Number of steps run so far.
    pub const fn step_count(&self) -> u64 {
        self.clock.step()
    }

    /// The entrance cell: the middle of row 0.
    pub const fn entrance(&self) -> Cell {
        self.entrance
    }

    /// The exit cell. Dogs leave the way they came in.
    pub const fn exit_cell(&self) -> Cell {
        self.entrance
    }

    /// Population counters.
    pub const fn population(&self) -> PopulationStats {
        PopulationStats {
            current_dogs: self.current_dogs,
            total_dogs_added: self.total_dogs_added,
            max_dogs: self.config.population.max_dogs,
        }
    }

    /// Whether every dog the park will ever admit has come and gone.
    pub const fn is_emptied(&self) -> bool {
        self.config.population.max_dogs > 0
            && self.total_dogs_added >= self.config.population.max_dogs
            && self.current_dogs == 0
    }

    /// A scheduled dog.
    pub fn dog(&self, id: AgentId) -> Option<&Dog> {
        self.scheduler.get(id).and_then(Agent::as_dog)
    }

    /// A scheduled park object.
    pub fn object(&self, id: AgentId) -> Option<&ParkObject> {
        self.scheduler.get(id).and_then(Agent::as_object)
    }

    /// Where an agent is, or `None` if it is carried or gone.
    pub fn position_of(&self, id: AgentId) -> Option<Cell> {
        self.grid.position_of(id)
    }

    /// All scheduled dogs in id order.
    pub fn dogs(&self) -> impl Iterator<Item = (AgentId, &Dog)> {
        self.scheduler
            .iter()
            .filter_map(|(id, agent)| agent.as_dog().map(|dog| (id, dog)))
    }

    /// All scheduled park objects in id order.
    pub fn objects(&self) -> impl Iterator<Item = (AgentId, &ParkObject)> {
        self.scheduler
            .iter()
            .filter_map(|(id, agent)| agent.as_object().map(|object| (id, object)))
    }

    /// Build the Moore-neighbourhood view a dog at `cell` decides from.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if `cell` is outside the grid.
    pub fn surroundings(&self, cell: Cell) -> Result<Surroundings, WorldError> {
        let neighbors = self
            .grid
            .neighbors(cell, false)?
            .into_iter()
            .map(|n| -> Result<NeighborView, GridError> {
                Ok(NeighborView::new(n, self.grid.occupants(n)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Surroundings::new(neighbors))
    }

    /// Read-only view for renderers: every scheduled agent with a position.
    pub fn snapshot(&self) -> ParkSnapshot {
        let entities = self
            .scheduler
            .iter()
            .filter_map(|(id, agent)| {
                let cell = self.grid.position_of(id)?;
                Some(RenderEntity {
                    id,
                    x: cell.x,
                    y: cell.y,
                    display: agent.display(),
                })
            })
            .collect();
        ParkSnapshot {
            step: self.clock.step(),
            width: self.grid.width(),
            height: self.grid.height(),
            entrance: self.entrance,
            population: self.population(),
            entities,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use dogpark_types::DisplayKind;

    use super::*;

    fn empty_park(width: u32, height: u32, max_dogs: u32) -> World {
        World::new(ParkConfig::new(width, height, max_dogs, 0, 0, 0, 0.0).with_seed(1)).unwrap()
    }

    #[test]
    fn construction_places_requested_objects() {
        let world = World::new(ParkConfig::new(10, 10, 25, 10, 3, 5, 0.15)).unwrap();
        assert_eq!(world.grid().count_kind(AgentKind::Tree), 10);
        assert_eq!(world.grid().count_kind(AgentKind::FoodBowl), 3);
        assert_eq!(world.grid().count_kind(AgentKind::Toy), 5);
        assert_eq!(world.scheduler().len(), 18);
        // Every object sits on its own cell.
        assert_eq!(world.grid().occupied_cells().len(), 18);
        assert_eq!(world.entrance(), Cell::new(5, 0));
        assert_eq!(world.population().current_dogs, 0);
    }

    #[test]
    fn trees_and_toys_avoid_entrance_row() {
        for seed in 0..20 {
            let world = World::new(ParkConfig::new(4, 4, 1, 6, 3, 6, 0.0).with_seed(seed)).unwrap();
            for (id, object) in world.objects() {
                let cell = world.position_of(id).unwrap();
                if matches!(object.kind(), ObjectKind::Tree | ObjectKind::Toy) {
                    assert_ne!(cell.y, 0, "{:?} placed on row 0", object.kind());
                }
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = World::new(ParkConfig::default()).unwrap();
        let b = World::new(ParkConfig::default()).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = World::new(ParkConfig::new(3, 3, 1, 5, 3, 2, 0.5));
        assert!(matches!(result, Err(WorldError::Config { .. })));
    }

    #[test]
    fn saturated_placement_fails_loudly() {
        let mut world = World::new(ParkConfig::new(2, 2, 1, 0, 3, 0, 0.0)).unwrap();
        // Three bowls on four cells; fill the last one and ask for more.
        let empty = world.grid().empty_cells();
        assert_eq!(empty.len(), 1);
        world.place_object(ObjectKind::FoodBowl, empty[0]).unwrap();
        let err = world.add_food_bowl();
        assert!(matches!(
            err,
            Err(WorldError::GridSaturated {
                kind: AgentKind::FoodBowl,
                ..
            })
        ));
    }

    #[test]
    fn place_object_enforces_reserved_row() {
        let mut world = empty_park(3, 3, 1);
        assert!(matches!(
            world.place_object(ObjectKind::Tree, Cell::new(0, 0)),
            Err(WorldError::ReservedRow { .. })
        ));
        assert!(matches!(
            world.place_object(ObjectKind::Toy, Cell::new(2, 0)),
            Err(WorldError::ReservedRow { .. })
        ));
        assert!(world.place_object(ObjectKind::FoodBowl, Cell::new(2, 0)).is_ok());
        assert!(world.place_object(ObjectKind::Tree, Cell::new(7, 7)).is_err());
    }

    #[test]
    fn admit_dog_places_at_entrance() {
        let mut world = empty_park(3, 3, 2);
        let outcome = world.admit_dog().unwrap();
        let ArrivalOutcome::Admitted(id) = outcome else {
            panic!("expected admission, got {outcome:?}");
        };
        assert_eq!(world.position_of(id), Some(Cell::new(1, 0)));
        let dog = world.dog(id).unwrap();
        assert_eq!(dog.name(), "Dog_0");
        assert!((10..=100).contains(&dog.energy()));
        assert_eq!(world.population().total_dogs_added, 1);
        assert_eq!(world.population().current_dogs, 1);
    }

    #[test]
    fn admit_dog_refuses_only_at_cap() {
        let mut world = empty_park(3, 3, 1);
        assert!(matches!(world.admit_dog().unwrap(), ArrivalOutcome::Admitted(_)));
        assert_eq!(world.admit_dog().unwrap(), ArrivalOutcome::PopulationCapReached);
        assert_eq!(world.population().total_dogs_added, 1);
    }

    #[test]
    fn newcomer_joins_dog_on_entrance() {
        let mut world = empty_park(3, 3, 5);
        let first = world.admit_dog().unwrap();
        let second = world.admit_dog().unwrap();
        let (ArrivalOutcome::Admitted(a), ArrivalOutcome::Admitted(b)) = (first, second) else {
            panic!("expected two admissions, got {first:?} and {second:?}");
        };
        assert_eq!(world.position_of(a), Some(world.entrance()));
        assert_eq!(world.position_of(b), Some(world.entrance()));
        assert_eq!(world.grid().cell(world.entrance()).unwrap().count_of(AgentKind::Dog), 2);
        assert_eq!(world.population().total_dogs_added, 2);
        assert_eq!(world.dog(b).unwrap().name(), "Dog_1");
    }

    #[test]
    fn remove_dog_updates_counters() {
        let mut world = empty_park(3, 3, 1);
        let ArrivalOutcome::Admitted(id) = world.admit_dog().unwrap() else {
            panic!("expected admission");
        };
        let dog = world.remove_dog(id).unwrap();
        assert_eq!(dog.name(), "Dog_0");
        assert_eq!(world.position_of(id), None);
        assert!(world.dog(id).is_none());
        assert!(world.is_emptied());
    }

    #[test]
    fn remove_dog_rejects_objects() {
        let mut world = empty_park(3, 3, 1);
        let bowl = world.place_object(ObjectKind::FoodBowl, Cell::new(1, 1)).unwrap();
        assert!(matches!(world.remove_dog(bowl), Err(WorldError::AgentMissing(_))));
        assert!(world.object(bowl).is_some());
    }

    #[test]
    fn surroundings_follow_scan_order() {
        let mut world = empty_park(3, 3, 1);
        let toy = world.place_object(ObjectKind::Toy, Cell::new(0, 1)).unwrap();
        let view = world.surroundings(Cell::new(1, 1)).unwrap();
        assert_eq!(view.neighbors.len(), 8);
        assert_eq!(view.neighbors[0].cell, Cell::new(0, 0));
        assert_eq!(view.neighbors[1].occupants, vec![(toy, AgentKind::Toy)]);
        assert_eq!(view.first_toy(), Some(toy));
    }

    #[test]
    fn snapshot_lists_positioned_agents() {
        let mut world = empty_park(3, 3, 1);
        let tree = world.place_object(ObjectKind::Tree, Cell::new(2, 2)).unwrap();
        world.admit_dog().unwrap();
        let snapshot = world.snapshot();
        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.entities[0].id, tree);
        assert_eq!(snapshot.entities[0].display, DisplayKind::Tree);
        assert!(matches!(snapshot.entities[1].display, DisplayKind::Dog { .. }));
        assert_eq!((snapshot.entities[1].x, snapshot.entities[1].y), (1, 0));
        assert_eq!(snapshot.population.current_dogs, 1);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ParkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
