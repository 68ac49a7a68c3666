//! The park grid: a bounded rectangle of cells, each holding any number of
//! occupants.
//!
//! Cells are stored row-major. A reverse index maps every placed agent to its
//! cell, so removal and relocation never scan the grid. There is no
//! wraparound at the edges.

use std::collections::BTreeMap;

use dogpark_types::{AgentId, AgentKind, Cell};
use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::error::GridError;

/// Relative offsets of the Moore neighbourhood in scan order: column-major,
/// x from left to right, and within each column y from low to high.
const MOORE_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A rectangular multi-occupancy grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkGrid {
    width: u32,
    height: u32,
    /// Row-major cell buckets, `width * height` entries.
    cells: Vec<CellState>,
    /// Reverse index: agent -> the cell it occupies.
    positions: BTreeMap<AgentId, Cell>,
}

impl ParkGrid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either side is zero or the
    /// cell count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let count = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::new(); count],
            positions: BTreeMap::new(),
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell lies inside the grid.
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: Cell) -> Result<usize, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            cell,
            width: self.width,
            height: self.height,
        };
        if !self.contains(cell) {
            return Err(out_of_bounds);
        }
        let x = usize::try_from(cell.x).map_err(|_err| out_of_bounds.clone())?;
        let y = usize::try_from(cell.y).map_err(|_err| out_of_bounds.clone())?;
        let w = usize::try_from(self.width).map_err(|_err| out_of_bounds.clone())?;
        y.checked_mul(w)
            .and_then(|row| row.checked_add(x))
            .ok_or(out_of_bounds)
    }

    fn bucket(&self, cell: Cell) -> Result<&CellState, GridError> {
        let idx = self.index(cell)?;
        self.cells.get(idx).ok_or(GridError::OutOfBounds {
            cell,
            width: self.width,
            height: self.height,
        })
    }

    fn bucket_mut(&mut self, cell: Cell) -> Result<&mut CellState, GridError> {
        let idx = self.index(cell)?;
        let (width, height) = (self.width, self.height);
        self.cells
            .get_mut(idx)
            .ok_or(GridError::OutOfBounds { cell, width, height })
    }

    /// Immutable view of one cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for cells outside the grid.
    pub fn cell(&self, cell: Cell) -> Result<&CellState, GridError> {
        self.bucket(cell)
    }

    /// Place an agent on a cell. The cell may already hold other occupants.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for cells outside the grid, or
    /// [`GridError::AlreadyPlaced`] if the agent already has a position.
    pub fn place(&mut self, agent: AgentId, kind: AgentKind, cell: Cell) -> Result<(), GridError> {
        if let Some(&current) = self.positions.get(&agent) {
            return Err(GridError::AlreadyPlaced {
                agent,
                cell: current,
            });
        }
        self.bucket_mut(cell)?.insert(agent, kind);
        self.positions.insert(agent, cell);
        Ok(())
    }

    /// Take an agent off the grid, returning where it was and its kind.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NotOnGrid`] if the agent has no position.
    pub fn remove(&mut self, agent: AgentId) -> Result<(Cell, AgentKind), GridError> {
        let cell = self
            .positions
            .remove(&agent)
            .ok_or(GridError::NotOnGrid(agent))?;
        let kind = self
            .bucket_mut(cell)?
            .remove(agent)
            .ok_or(GridError::NotOnGrid(agent))?;
        Ok((cell, kind))
    }

    /// Relocate an agent, returning the cell it left. Moving onto an occupied
    /// cell is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the destination is outside the
    /// grid (the agent stays put), or [`GridError::NotOnGrid`] if the agent
    /// has no position.
    pub fn move_agent(&mut self, agent: AgentId, to: Cell) -> Result<Cell, GridError> {
        // Validate before touching anything so a bad move leaves no trace.
        self.index(to)?;
        let (from, kind) = self.remove(agent)?;
        self.place(agent, kind, to)?;
        Ok(from)
    }

    /// The cell an agent occupies, if it is on the grid.
    pub fn position_of(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(&agent).copied()
    }

    /// The kind recorded for an agent on the grid.
    pub fn kind_of(&self, agent: AgentId) -> Option<AgentKind> {
        let cell = self.position_of(agent)?;
        self.bucket(cell)
            .ok()?
            .occupants()
            .find(|(id, _)| *id == agent)
            .map(|(_, kind)| kind)
    }

    /// The up-to-eight Moore neighbours of `cell` in scan order, plus the
    /// cell itself when `include_center` is set.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `cell` is outside the grid.
    pub fn neighbors(&self, cell: Cell, include_center: bool) -> Result<Vec<Cell>, GridError> {
        self.index(cell)?;
        let mut out = Vec::with_capacity(MOORE_OFFSETS.len());
        for (dx, dy) in MOORE_OFFSETS {
            if dx == 0 && dy == 0 && !include_center {
                continue;
            }
            let (Some(x), Some(y)) = (cell.x.checked_add_signed(dx), cell.y.checked_add_signed(dy))
            else {
                continue;
            };
            let candidate = Cell::new(x, y);
            if self.contains(candidate) {
                out.push(candidate);
            }
        }
        Ok(out)
    }

    /// The occupants of a cell as `(id, kind)` pairs in id order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for cells outside the grid.
    pub fn occupants(&self, cell: Cell) -> Result<Vec<(AgentId, AgentKind)>, GridError> {
        Ok(self.bucket(cell)?.occupants().collect())
    }

    /// Whether the cell has no occupants.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for cells outside the grid.
    pub fn is_empty(&self, cell: Cell) -> Result<bool, GridError> {
        Ok(self.bucket(cell)?.is_empty())
    }

    /// Whether a dog may enter the cell (no dog, no tree).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for cells outside the grid.
    pub fn is_open(&self, cell: Cell) -> Result<bool, GridError> {
        Ok(self.bucket(cell)?.is_open())
    }

    /// Iterate over every cell with its coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &CellState)> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
            .zip(self.cells.iter())
    }

    /// All cells without occupants.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|(_, state)| state.is_empty())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// All cells with at least one occupant.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|(_, state)| !state.is_empty())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of agents currently on the grid.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of agents of a given kind on the grid.
    pub fn count_kind(&self, kind: AgentKind) -> usize {
        self.cells.iter().map(|c| c.count_of(kind)).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid() -> ParkGrid {
        ParkGrid::new(4, 3).unwrap()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(ParkGrid::new(0, 5).is_err());
        assert!(ParkGrid::new(5, 0).is_err());
    }

    #[test]
    fn place_and_remove_round_trip() {
        let mut g = grid();
        let a = AgentId::new(1);
        g.place(a, AgentKind::Dog, Cell::new(2, 1)).unwrap();
        assert_eq!(g.position_of(a), Some(Cell::new(2, 1)));
        assert_eq!(g.kind_of(a), Some(AgentKind::Dog));
        assert!(!g.is_empty(Cell::new(2, 1)).unwrap());

        let (cell, kind) = g.remove(a).unwrap();
        assert_eq!(cell, Cell::new(2, 1));
        assert_eq!(kind, AgentKind::Dog);
        assert!(g.is_empty(Cell::new(2, 1)).unwrap());
        assert_eq!(g.position_of(a), None);
    }

    #[test]
    fn double_place_is_rejected() {
        let mut g = grid();
        let a = AgentId::new(1);
        g.place(a, AgentKind::Toy, Cell::new(0, 1)).unwrap();
        let err = g.place(a, AgentKind::Toy, Cell::new(1, 1));
        assert_eq!(
            err,
            Err(GridError::AlreadyPlaced {
                agent: a,
                cell: Cell::new(0, 1)
            })
        );
    }

    #[test]
    fn remove_absent_agent_errors() {
        let mut g = grid();
        assert_eq!(
            g.remove(AgentId::new(5)),
            Err(GridError::NotOnGrid(AgentId::new(5)))
        );
    }

    #[test]
    fn stacking_is_permitted() {
        let mut g = grid();
        let cell = Cell::new(1, 1);
        g.place(AgentId::new(1), AgentKind::Dog, cell).unwrap();
        g.place(AgentId::new(2), AgentKind::FoodBowl, cell).unwrap();
        g.place(AgentId::new(3), AgentKind::Toy, cell).unwrap();
        assert_eq!(g.occupants(cell).unwrap().len(), 3);
        assert!(!g.is_open(cell).unwrap());
    }

    #[test]
    fn move_updates_both_indexes() {
        let mut g = grid();
        let a = AgentId::new(1);
        g.place(a, AgentKind::Dog, Cell::new(0, 0)).unwrap();
        let from = g.move_agent(a, Cell::new(3, 2)).unwrap();
        assert_eq!(from, Cell::new(0, 0));
        assert!(g.is_empty(Cell::new(0, 0)).unwrap());
        assert_eq!(g.occupants(Cell::new(3, 2)).unwrap(), vec![(a, AgentKind::Dog)]);
    }

    #[test]
    fn move_out_of_bounds_leaves_agent_in_place() {
        let mut g = grid();
        let a = AgentId::new(1);
        g.place(a, AgentKind::Dog, Cell::new(0, 0)).unwrap();
        assert!(g.move_agent(a, Cell::new(9, 9)).is_err());
        assert_eq!(g.position_of(a), Some(Cell::new(0, 0)));
    }

    #[test]
    fn corner_has_three_neighbors() {
        let g = grid();
        let n = g.neighbors(Cell::new(0, 0), false).unwrap();
        assert_eq!(n, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn interior_neighbors_follow_scan_order() {
        let g = grid();
        let n = g.neighbors(Cell::new(1, 1), false).unwrap();
        assert_eq!(
            n,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 0),
                Cell::new(1, 2),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2),
            ]
        );
        let with_center = g.neighbors(Cell::new(1, 1), true).unwrap();
        assert_eq!(with_center.len(), 9);
        assert!(with_center.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn no_wraparound_on_far_edge() {
        let g = grid();
        let n = g.neighbors(Cell::new(3, 2), false).unwrap();
        assert_eq!(n.len(), 3);
        assert!(n.iter().all(|c| g.contains(*c)));
    }

    #[test]
    fn empty_and_occupied_partition_the_grid() {
        let mut g = grid();
        g.place(AgentId::new(1), AgentKind::Tree, Cell::new(1, 2)).unwrap();
        g.place(AgentId::new(2), AgentKind::Tree, Cell::new(3, 0)).unwrap();
        assert_eq!(g.occupied_cells(), vec![Cell::new(3, 0), Cell::new(1, 2)]);
        assert_eq!(g.empty_cells().len(), 10);
        assert_eq!(g.count_kind(AgentKind::Tree), 2);
        assert_eq!(g.agent_count(), 2);
    }
}
