//! Water flow at the player's current rotations

use std::collections::VecDeque;

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::openings::OpeningsSnapshot;
use crate::spatial::grid::Cell;

/// Cells reached by water from Start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowResult {
    /// Filled cells in the order the water reached them
    pub filled: Vec<Cell>,
    /// Whether End was reached
    pub reached_end: bool,
}

impl FlowResult {
    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }

    /// Level is won: End reached and at least `max_fillable` cells filled
    pub fn is_complete(&self, max_fillable: usize) -> bool {
        self.reached_end && self.filled.len() >= max_fillable
    }
}

/// Flood from `start` across edges where both sides are open
///
/// `current` must hold the rotated openings, not the base ones.
pub fn simulate_flow(current: &OpeningsSnapshot, start: Cell, end: Cell) -> FlowResult {
    let grid = current.grid();
    let mut seen = CellBitset::new(grid);
    let mut filled = Vec::new();
    let mut queue = VecDeque::new();

    if seen.insert(start) {
        queue.push_back(start);
    }
    while let Some(cell) = queue.pop_front() {
        filled.push(cell);
        for direction in current.get(cell).iter() {
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };
            if current.get(neighbor).contains(direction.opposite()) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    FlowResult {
        reached_end: seen.contains(end),
        filled,
    }
}
