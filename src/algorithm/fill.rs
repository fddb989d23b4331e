//! Max-fill exploration from fixed solution paths
//!
//! Given one solution with its rotations, the flood grows breadth-first from
//! every path cell. Each newly reached neighbour is fixed at the first rotation
//! that faces back, and is never revisited, so the result measures how much
//! pipework one committed solution can wire into a single component.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::openings::OpeningsSnapshot;
use crate::algorithm::solvability::{SearchBudget, SearchOutcome, SolutionPathInfo, find_all_solution_paths};
use crate::io::configuration::FILL_CAP_FACTOR;
use crate::spatial::grid::Cell;

/// Best fill over all solutions found
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaxFill {
    /// Largest component size reached
    pub max_fillable_tiles: usize,
    /// Solution that reached it
    pub main_solution: Option<SolutionPathInfo>,
    /// Solutions explored
    pub paths_considered: usize,
    /// Whether the all-paths search or any expansion hit its cap
    pub truncated: bool,
}

/// Size of the component flooded from one solution path
///
/// Never smaller than the number of path cells. Expansion is capped at
/// `width * height * 5` frontier pops; beyond that the count so far is
/// returned with `truncated` set.
pub fn explore_fill_from_path(
    snapshot: &OpeningsSnapshot,
    path: &SolutionPathInfo,
) -> SearchOutcome<usize> {
    let grid = snapshot.grid();
    let mut filled = CellBitset::new(grid);
    let mut frontier: VecDeque<(Cell, u8)> = VecDeque::new();
    let start = path.path_positions.first().copied();

    for &cell in &path.path_positions {
        filled.insert(cell);
        let rotation = match path.rotations.get(&cell) {
            Some(&rotation) => Some(rotation),
            None if Some(cell) == start && !snapshot.get(cell).is_empty() => Some(0),
            None => None,
        };
        if let Some(rotation) = rotation {
            frontier.push_back((cell, rotation));
        }
    }

    let cap = grid.cell_count() * FILL_CAP_FACTOR;
    let mut steps = 0;
    let mut truncated = false;

    while let Some((cell, rotation)) = frontier.pop_front() {
        if steps >= cap {
            warn!("Fill expansion exceeded {cap} iterations, keeping partial result");
            truncated = true;
            break;
        }
        steps += 1;

        for direction in snapshot.get(cell).rotated(rotation).iter() {
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };
            if filled.contains(neighbor) {
                continue;
            }
            if let Some(neighbor_rotation) = snapshot.rotation_exposing(neighbor, direction.opposite()) {
                filled.insert(neighbor);
                frontier.push_back((neighbor, neighbor_rotation));
            }
        }
    }

    SearchOutcome {
        result: filled.count(),
        steps,
        truncated,
    }
}

/// Largest fill over every solution path, with the path that achieves it
///
/// Ties keep the earliest solution found.
pub fn calculate_max_fillable_tiles(
    snapshot: &OpeningsSnapshot,
    start: Cell,
    end: Cell,
    budget: SearchBudget,
) -> MaxFill {
    let solutions = find_all_solution_paths(snapshot, start, end, budget);
    let mut best = MaxFill {
        paths_considered: solutions.result.len(),
        truncated: solutions.truncated,
        ..MaxFill::default()
    };

    for solution in solutions.result {
        let fill = explore_fill_from_path(snapshot, &solution);
        best.truncated |= fill.truncated;
        if best.main_solution.is_none() || fill.result > best.max_fillable_tiles {
            best.max_fillable_tiles = fill.result;
            best.main_solution = Some(solution);
        }
    }

    debug!(
        "Max fill {} over {} solutions",
        best.max_fillable_tiles, best.paths_considered
    );
    best
}
