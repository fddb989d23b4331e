//! Planning grid and tile-plan output of the level planner

use ndarray::Array2;

use crate::generation::difficulty::DifficultyParameters;
use crate::generation::path::Path;
use crate::generation::validation::ValidationReport;
use crate::spatial::direction::{Direction, DirectionSet};
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::tiles::Archetype;

/// Required (unrotated) openings per cell, filled in over several passes
///
/// `None` marks a cell no pass has planned yet. `Some(EMPTY)` is a planned
/// empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningGrid {
    grid: Grid,
    cells: Array2<Option<DirectionSet>>,
}

impl PlanningGrid {
    /// Create a grid with every cell unplanned
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: Array2::from_elem(grid.shape(), None),
        }
    }

    /// Grid extent
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Planned openings of a cell
    pub fn get(&self, cell: Cell) -> Option<DirectionSet> {
        self.grid
            .array_index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Whether any pass has planned the cell
    pub fn is_planned(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Replace the planned openings of a cell
    pub fn set(&mut self, cell: Cell, directions: DirectionSet) {
        if let Some(slot) = self
            .grid
            .array_index(cell)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = Some(directions);
        }
    }

    /// Union `directions` into the cell's planned openings
    pub fn merge(&mut self, cell: Cell, directions: DirectionSet) {
        let merged = self.get(cell).unwrap_or_default().union(directions);
        self.set(cell, merged);
    }

    /// Add one opening to a cell
    pub fn add_direction(&mut self, cell: Cell, direction: Direction) {
        self.merge(cell, DirectionSet::EMPTY.with(direction));
    }

    /// Remove one opening from a planned cell
    pub fn remove_direction(&mut self, cell: Cell, direction: Direction) {
        if let Some(directions) = self.get(cell) {
            self.set(cell, directions.without(direction));
        }
    }

    /// Planned cells in row-major order
    pub fn planned_cells(&self) -> Vec<Cell> {
        self.grid.cells().filter(|&cell| self.is_planned(cell)).collect()
    }

    /// Unplanned cells in row-major order
    pub fn unplanned_cells(&self) -> Vec<Cell> {
        self.grid.cells().filter(|&cell| !self.is_planned(cell)).collect()
    }

    /// Cells with a required opening that points off the grid
    pub fn off_grid_openings(&self) -> Vec<(Cell, Direction)> {
        self.grid
            .cells()
            .flat_map(|cell| {
                self.get(cell)
                    .unwrap_or_default()
                    .iter()
                    .filter(move |&direction| self.grid.neighbor(cell, direction).is_none())
                    .map(move |direction| (cell, direction))
            })
            .collect()
    }
}

/// Planned tile for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlan {
    /// Cell position
    pub cell: Cell,
    /// Archetype to realize
    pub archetype: Archetype,
    /// Required openings before rotation
    pub directions: DirectionSet,
    /// Whether the cell lies on the critical path
    pub on_critical_path: bool,
    /// Whether the cell is a key tile
    pub key_tile: bool,
}

/// Complete output of one planning run
#[derive(Debug, Clone)]
pub struct LevelPlan {
    /// Grid extent
    pub grid: Grid,
    /// Start cell
    pub start: Cell,
    /// End cell
    pub end: Cell,
    /// Primary start-to-end route
    pub critical_path: Path,
    /// Key tiles along the critical path
    pub key_tiles: Vec<Cell>,
    /// Exactly one tile plan per grid cell, row-major
    pub tiles: Vec<TilePlan>,
    /// Final difficulty validation
    pub validation: ValidationReport,
    /// Parameters the plan was built with
    pub difficulty: DifficultyParameters,
}

impl LevelPlan {
    /// Tile plan of a cell
    pub fn tile(&self, cell: Cell) -> Option<&TilePlan> {
        self.grid.index(cell).and_then(|index| self.tiles.get(index))
    }
}
