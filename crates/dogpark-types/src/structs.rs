//! Core value structs: grid coordinates and the render snapshot.
//!
//! The snapshot types are the read-only view handed to whatever draws the
//! park after each step. They carry no references back into the world.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::DisplayKind;
use crate::ids::AgentId;

/// A grid coordinate. `y == 0` is the entrance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Column, `0 <= x < width`.
    pub x: u32,
    /// Row, `0 <= y < height`.
    pub y: u32,
}

impl Cell {
    /// Create a cell from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Whether `other` is one of the (up to) eight Moore neighbours of this
    /// cell. A cell is not its own neighbour.
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && !(dx == 0 && dy == 0)
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Population counters tracked by the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationStats {
    /// Dogs currently in the park.
    pub current_dogs: u32,
    /// Dogs admitted since the park opened.
    pub total_dogs_added: u32,
    /// Upper bound on `total_dogs_added`.
    pub max_dogs: u32,
}

/// One positioned agent as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderEntity {
    /// The agent.
    pub id: AgentId,
    /// Column of the agent's cell.
    pub x: u32,
    /// Row of the agent's cell.
    pub y: u32,
    /// How to draw it.
    pub display: DisplayKind,
}

/// Read-only view of the park after a step.
///
/// Lists every scheduled agent that currently has a position, in ascending
/// id order. Carried toys have no position and are drawn as part of their
/// dog ([`DisplayKind::DogWithToy`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParkSnapshot {
    /// Number of steps completed.
    pub step: u64,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// The entrance/exit cell.
    pub entrance: Cell,
    /// Population counters.
    pub population: PopulationStats,
    /// Positioned agents.
    pub entities: Vec<RenderEntity>,
}

impl ParkSnapshot {
    /// Entities drawn at a particular cell.
    pub fn entities_at(&self, cell: Cell) -> impl Iterator<Item = &RenderEntity> {
        self.entities
            .iter()
            .filter(move |e| e.x == cell.x && e.y == cell.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_moore_without_center() {
        let c = Cell::new(1, 1);
        assert!(c.is_adjacent(Cell::new(0, 0)));
        assert!(c.is_adjacent(Cell::new(2, 2)));
        assert!(c.is_adjacent(Cell::new(1, 0)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(3, 1)));
    }

    #[test]
    fn snapshot_filters_by_cell() {
        let snapshot = ParkSnapshot {
            step: 1,
            width: 3,
            height: 3,
            entrance: Cell::new(1, 0),
            population: PopulationStats::default(),
            entities: vec![
                RenderEntity {
                    id: AgentId::new(0),
                    x: 1,
                    y: 1,
                    display: DisplayKind::Tree,
                },
                RenderEntity {
                    id: AgentId::new(1),
                    x: 2,
                    y: 1,
                    display: DisplayKind::Toy,
                },
            ],
        };
        let at: Vec<AgentId> = snapshot.entities_at(Cell::new(2, 1)).map(|e| e.id).collect();
        assert_eq!(at, vec![AgentId::new(1)]);
    }
}
