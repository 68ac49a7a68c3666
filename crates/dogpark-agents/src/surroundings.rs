//! What a dog perceives before deciding: its Moore neighbourhood.
//!
//! The world assembles [`Surroundings`] from the grid in scan order; the dog
//! decides from that view alone and never touches the grid itself.

use dogpark_types::{AgentId, AgentKind, Cell};

/// One neighbouring cell and its occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborView {
    /// The neighbouring cell.
    pub cell: Cell,
    /// Occupants of that cell in id order.
    pub occupants: Vec<(AgentId, AgentKind)>,
}

impl NeighborView {
    /// Create a view of one cell.
    pub const fn new(cell: Cell, occupants: Vec<(AgentId, AgentKind)>) -> Self {
        Self { cell, occupants }
    }

    /// Whether a dog may step onto this cell (no dog, no tree).
    pub fn is_open(&self) -> bool {
        !self.occupants.iter().any(|(_, kind)| kind.blocks_movement())
    }

    /// The first occupant of the given kind, by id.
    pub fn first_of(&self, kind: AgentKind) -> Option<AgentId> {
        self.occupants
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(id, _)| *id)
    }
}

/// The Moore neighbourhood of a dog, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surroundings {
    /// Neighbouring cells, excluding the dog's own cell.
    pub neighbors: Vec<NeighborView>,
}

impl Surroundings {
    /// Wrap a list of neighbour views.
    pub const fn new(neighbors: Vec<NeighborView>) -> Self {
        Self { neighbors }
    }

    /// The first food bowl, in scan order, whose cell a dog may enter.
    pub fn first_reachable_bowl(&self) -> Option<(AgentId, Cell)> {
        self.neighbors
            .iter()
            .filter(|n| n.is_open())
            .find_map(|n| n.first_of(AgentKind::FoodBowl).map(|id| (id, n.cell)))
    }

    /// The first toy lying in any neighbouring cell, in scan order.
    pub fn first_toy(&self) -> Option<AgentId> {
        self.neighbors
            .iter()
            .find_map(|n| n.first_of(AgentKind::Toy))
    }

    /// Neighbouring cells a dog may step onto.
    pub fn open_cells(&self) -> Vec<Cell> {
        self.neighbors
            .iter()
            .filter(|n| n.is_open())
            .map(|n| n.cell)
            .collect()
    }

    /// The view of a specific neighbouring cell.
    pub fn get(&self, cell: Cell) -> Option<&NeighborView> {
        self.neighbors.iter().find(|n| n.cell == cell)
    }
}
