//! Fixed-size cell membership sets backed by `bitvec`

use bitvec::prelude::*;
use std::fmt;

use crate::spatial::grid::{Cell, Grid};

/// Fixed-size bitset over the cells of one grid
///
/// Cells map to bits by their row-major index. Cells outside the grid are
/// never members and inserting them is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitset {
    bits: BitVec,
    grid: Grid,
}

impl CellBitset {
    /// Create a set with no cells present
    pub fn new(grid: Grid) -> Self {
        Self {
            bits: bitvec![0; grid.cell_count()],
            grid,
        }
    }

    /// Insert a cell, returning whether it was newly added
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(index) = self.grid.index(cell) else {
            return false;
        };
        let was_present = self.bits.get(index).as_deref() == Some(&true);
        self.bits.set(index, true);
        !was_present
    }

    /// Remove a cell
    pub fn remove(&mut self, cell: Cell) {
        if let Some(index) = self.grid.index(cell) {
            self.bits.set(index, false);
        }
    }

    /// Test cell membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.grid
            .index(cell)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Member cells in row-major order
    pub fn cells(&self) -> Vec<Cell> {
        self.bits
            .iter_ones()
            .filter_map(|index| self.grid.cell_at(index))
            .collect()
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellBitset({} cells)", self.count())
    }
}
