//! Per-cell openings snapshot consumed by the searches
//!
//! The searches read openings from a snapshot taken before they start, so
//! rotating tiles on a board cannot disturb a search in progress.

use ndarray::Array2;

use crate::spatial::direction::{Direction, DirectionSet};
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::tiles::rotation_exposing;

/// Openings of every cell of one grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningsSnapshot {
    grid: Grid,
    openings: Array2<DirectionSet>,
}

impl OpeningsSnapshot {
    /// Snapshot with every cell closed
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            openings: Array2::from_elem(grid.shape(), DirectionSet::EMPTY),
        }
    }

    /// Snapshot filled from a per-cell function
    pub fn from_fn(grid: Grid, mut openings: impl FnMut(Cell) -> DirectionSet) -> Self {
        let mut snapshot = Self::new(grid);
        for cell in grid.cells() {
            snapshot.set(cell, openings(cell));
        }
        snapshot
    }

    /// Grid extent
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Openings of a cell, empty outside the grid
    pub fn get(&self, cell: Cell) -> DirectionSet {
        self.grid
            .array_index(cell)
            .and_then(|index| self.openings.get(index).copied())
            .unwrap_or_default()
    }

    /// Replace the openings of a cell
    pub fn set(&mut self, cell: Cell, openings: DirectionSet) {
        if let Some(slot) = self
            .grid
            .array_index(cell)
            .and_then(|index| self.openings.get_mut(index))
        {
            *slot = openings;
        }
    }

    /// First rotation of the cell's openings that exposes `direction`
    pub fn rotation_exposing(&self, cell: Cell, direction: Direction) -> Option<u8> {
        rotation_exposing(self.get(cell), direction)
    }
}
