//! Difficulty validation and corrective adjustment of a planning grid

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::generation::difficulty::DifficultyParameters;
use crate::generation::path::Path;
use crate::generation::plan::PlanningGrid;
use crate::io::configuration::MAX_STRIPPED_CELLS;
use crate::math::probability::RandomSelector;
use crate::spatial::grid::Cell;

/// Edges tried when looking for room to insert a detour
const DETOUR_ATTEMPTS: usize = 8;

/// Outcome of validating a planning grid against its difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Approximate start-to-end path count, capped at `max_valid_paths + 1`
    pub valid_paths: usize,
    /// Critical path length in cells
    pub path_length: usize,
    /// Turns along the critical path
    pub turns: usize,
    /// Whether every threshold is met
    pub passed: bool,
}

impl ValidationReport {
    /// Whether the level needs more or longer routes
    pub const fn needs_longer_route(&self, parameters: &DifficultyParameters) -> bool {
        self.valid_paths < parameters.min_valid_paths
            || self.path_length < parameters.min_path_length
            || self.turns < parameters.min_turns
    }

    /// Whether the level has more solutions than allowed
    pub const fn too_many_paths(&self, parameters: &DifficultyParameters) -> bool {
        self.valid_paths > parameters.max_valid_paths
    }
}

/// Approximate number of start-to-end routes through matching openings
///
/// Breadth-first propagation of per-cell path counts over edges where both
/// sides declare the shared opening, ignoring rotation. Counts are summed when
/// a visited cell is reached again, so the result is an estimate. The result
/// never exceeds `cap`.
pub fn count_valid_paths(planning: &PlanningGrid, start: Cell, end: Cell, cap: usize) -> usize {
    let grid = planning.grid();
    let mut paths_to: HashMap<Cell, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut total = 0usize;

    paths_to.insert(start, 1);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if total > cap {
            break;
        }
        let here = paths_to.get(&current).copied().unwrap_or(0);
        if current == end {
            total = total.saturating_add(here);
            continue;
        }
        let Some(directions) = planning.get(current) else {
            continue;
        };

        for direction in directions.iter() {
            let Some(neighbor) = grid.neighbor(current, direction) else {
                continue;
            };
            let connects_back = planning
                .get(neighbor)
                .is_some_and(|set| set.contains(direction.opposite()));
            if !connects_back {
                continue;
            }
            match paths_to.get_mut(&neighbor) {
                None => {
                    paths_to.insert(neighbor, here);
                    queue.push_back(neighbor);
                }
                Some(count) if neighbor != end => *count = count.saturating_add(here),
                Some(_) => {}
            }
        }
    }

    total.min(cap)
}

/// Check path count, critical path length and turns against the thresholds
pub fn validate(
    planning: &PlanningGrid,
    critical_path: &Path,
    start: Cell,
    end: Cell,
    parameters: &DifficultyParameters,
) -> ValidationReport {
    let valid_paths = count_valid_paths(planning, start, end, parameters.max_valid_paths + 1);
    let path_length = critical_path.len();
    let turns = critical_path.turns();

    let passed = valid_paths >= parameters.min_valid_paths
        && valid_paths <= parameters.max_valid_paths
        && path_length >= parameters.min_path_length
        && turns >= parameters.min_turns;

    debug!(
        "Validation: paths {valid_paths} (target {}-{}), length {path_length} (min {}), turns {turns} (min {})",
        parameters.min_valid_paths,
        parameters.max_valid_paths,
        parameters.min_path_length,
        parameters.min_turns
    );

    ValidationReport {
        valid_paths,
        path_length,
        turns,
        passed,
    }
}

/// Apply one corrective pass for a failed validation
///
/// Too few or too short routes get a two-cell detour bumped out of one
/// critical-path edge. Too many routes lose one opening on each of up to five
/// non-critical cells with more than two openings. Returns whether the grid
/// changed.
pub fn adjust(
    planning: &mut PlanningGrid,
    critical_path: &mut Path,
    report: &ValidationReport,
    parameters: &DifficultyParameters,
    rng: &mut RandomSelector,
) -> bool {
    if report.needs_longer_route(parameters) {
        insert_detour(planning, critical_path, rng)
    } else if report.too_many_paths(parameters) {
        strip_connections(planning, critical_path, rng)
    } else {
        false
    }
}

// Reroute edge a->b through a' and b', the cells beside it on one side
fn insert_detour(planning: &mut PlanningGrid, critical_path: &mut Path, rng: &mut RandomSelector) -> bool {
    let grid = planning.grid();
    let edges = critical_path.len().saturating_sub(1);

    for _ in 0..DETOUR_ATTEMPTS {
        let Some(index) = rng.index(edges) else {
            return false;
        };
        let (Some(a), Some(b)) = (critical_path.get(index), critical_path.get(index + 1)) else {
            continue;
        };
        let Some(forward) = a.direction_to(b) else {
            continue;
        };
        // Skip edges already broken by a key-tile gap
        let intact = planning.get(a).is_some_and(|set| set.contains(forward))
            && planning.get(b).is_some_and(|set| set.contains(forward.opposite()));
        if !intact {
            continue;
        }

        let mut sides = [forward.rotated(1), forward.rotated(3)];
        rng.shuffle(&mut sides);
        for side in sides {
            let (a_side, b_side) = (a.step(side), b.step(side));
            if !grid.contains(a_side)
                || !grid.contains(b_side)
                || critical_path.contains(a_side)
                || critical_path.contains(b_side)
            {
                continue;
            }

            planning.remove_direction(a, forward);
            planning.remove_direction(b, forward.opposite());
            planning.add_direction(a, side);
            planning.add_direction(a_side, side.opposite());
            planning.add_direction(a_side, forward);
            planning.add_direction(b_side, forward.opposite());
            planning.add_direction(b_side, side.opposite());
            planning.add_direction(b, side);

            critical_path.insert(index + 1, b_side);
            critical_path.insert(index + 1, a_side);
            debug!("Inserted detour {a_side} -> {b_side} between {a} and {b}");
            return true;
        }
    }
    false
}

fn strip_connections(planning: &mut PlanningGrid, critical_path: &Path, rng: &mut RandomSelector) -> bool {
    let grid = planning.grid();
    let start = critical_path.first();
    let end = critical_path.last();
    let mut candidates: Vec<Cell> = planning
        .planned_cells()
        .into_iter()
        .filter(|&cell| {
            !critical_path.contains(cell)
                && Some(cell) != start
                && Some(cell) != end
                && planning.get(cell).is_some_and(|set| set.len() > 2)
        })
        .collect();
    rng.shuffle(&mut candidates);

    let mut changed = false;
    for cell in candidates.into_iter().take(MAX_STRIPPED_CELLS) {
        let directions: Vec<_> = planning.get(cell).unwrap_or_default().iter().collect();
        let Some(&direction) = rng.pick(&directions) else {
            continue;
        };
        planning.remove_direction(cell, direction);
        if let Some(neighbor) = grid.neighbor(cell, direction) {
            planning.remove_direction(neighbor, direction.opposite());
        }
        changed = true;
    }
    if changed {
        debug!("Stripped connections to reduce path count");
    }
    changed
}
