//! Per-cell occupant bucket.

use std::collections::BTreeMap;

use dogpark_types::{AgentId, AgentKind};
use serde::{Deserialize, Serialize};

/// The occupants of one grid cell.
///
/// Any mixture of kinds may share a cell. Occupants iterate in ascending
/// [`AgentId`] order, which keeps neighbourhood scans deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    occupants: BTreeMap<AgentId, AgentKind>,
}

impl CellState {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            occupants: BTreeMap::new(),
        }
    }

    /// Whether the cell holds no occupants at all.
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Whether a dog may step onto this cell: no dog and no tree present.
    pub fn is_open(&self) -> bool {
        !self.occupants.values().any(|kind| kind.blocks_movement())
    }

    /// Whether any occupant is of the given kind.
    pub fn contains_kind(&self, kind: AgentKind) -> bool {
        self.occupants.values().any(|k| *k == kind)
    }

    /// The first occupant of the given kind, by id.
    pub fn first_of(&self, kind: AgentKind) -> Option<AgentId> {
        self.occupants
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
    }

    /// Number of occupants of the given kind.
    pub fn count_of(&self, kind: AgentKind) -> usize {
        self.occupants.values().filter(|k| **k == kind).count()
    }

    /// Iterate over `(id, kind)` pairs.
    pub fn occupants(&self) -> impl Iterator<Item = (AgentId, AgentKind)> + '_ {
        self.occupants.iter().map(|(id, kind)| (*id, *kind))
    }

    /// Number of occupants.
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub(crate) fn insert(&mut self, id: AgentId, kind: AgentKind) {
        self.occupants.insert(id, kind);
    }

    pub(crate) fn remove(&mut self, id: AgentId) -> Option<AgentKind> {
        self.occupants.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowls_and_toys_leave_cell_open() {
        let mut cell = CellState::new();
        assert!(cell.is_empty());
        assert!(cell.is_open());
        cell.insert(AgentId::new(1), AgentKind::FoodBowl);
        cell.insert(AgentId::new(2), AgentKind::Toy);
        assert!(!cell.is_empty());
        assert!(cell.is_open());
    }

    #[test]
    fn dogs_and_trees_close_cell() {
        let mut cell = CellState::new();
        cell.insert(AgentId::new(1), AgentKind::Tree);
        assert!(!cell.is_open());

        let mut other = CellState::new();
        other.insert(AgentId::new(2), AgentKind::Dog);
        assert!(!other.is_open());
    }

    #[test]
    fn first_of_uses_id_order() {
        let mut cell = CellState::new();
        cell.insert(AgentId::new(9), AgentKind::Toy);
        cell.insert(AgentId::new(4), AgentKind::Toy);
        cell.insert(AgentId::new(2), AgentKind::FoodBowl);
        assert_eq!(cell.first_of(AgentKind::Toy), Some(AgentId::new(4)));
        assert_eq!(cell.count_of(AgentKind::Toy), 2);
        assert_eq!(cell.first_of(AgentKind::Dog), None);
    }
}
