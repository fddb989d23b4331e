//! Minimal level that is solvable by construction
//!
//! Used when every planning attempt fails or produces an unsolvable board.

use log::warn;

use crate::generation::difficulty::DifficultyParameters;
use crate::generation::path::l_path;
use crate::generation::plan::{LevelPlan, PlanningGrid};
use crate::generation::planner::assemble_tiles;
use crate::generation::validation::validate;
use crate::spatial::direction::DirectionSet;
use crate::spatial::grid::Cell;

/// L-shaped level: start (1,1), end (w-2,h-2), right then up, all else empty
///
/// When the grid is too small for the two cells to differ the end moves to
/// the far corner.
pub fn fallback_plan(parameters: &DifficultyParameters) -> LevelPlan {
    let grid = parameters.grid;
    let start = Cell::new(1, 1);
    let mut end = Cell::new(grid.width() as i32 - 2, grid.height() as i32 - 2);
    if end == start {
        end = Cell::new(grid.width() as i32 - 1, grid.height() as i32 - 1);
    }
    warn!("Using fallback level {start} -> {end}");

    let critical_path = l_path(start, end);
    let mut planning = PlanningGrid::new(grid);
    for cell in grid.cells() {
        planning.set(cell, DirectionSet::EMPTY);
    }
    for index in 0..critical_path.len() {
        if let Some(cell) = critical_path.get(index) {
            planning.set(cell, critical_path.directions_at(index));
        }
    }

    let validation = validate(&planning, &critical_path, start, end, parameters);
    let tiles = assemble_tiles(&planning, start, end, &critical_path, &[], |archetype| archetype);

    LevelPlan {
        grid,
        start,
        end,
        critical_path,
        key_tiles: Vec::new(),
        tiles,
        validation,
        difficulty: parameters.clone(),
    }
}
