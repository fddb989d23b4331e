//! Rotation-aware solvability search
//!
//! Depth-first backtracking over `(cell, incoming direction)` states with an
//! explicit stack. Each frame holds the moves still to try from its cell; a
//! move is a rotation plus the outgoing direction it exposes. Visited cells
//! are tracked per branch, so a cell appears at most once on any path.
//!
//! The existence search keeps one move per outgoing direction. The all-paths
//! search tries every rotation that keeps the entry open, since rotations
//! with the same entry and exit can still wire different neighbours.
//!
//! The End cell is reachable as soon as it is entered, whatever its own
//! openings. A neighbour other than End is only entered if some rotation of
//! it exposes the direction back to the current cell.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::openings::OpeningsSnapshot;
use crate::io::configuration::{DEFAULT_MAX_SOLUTIONS, DEFAULT_SEARCH_STEPS};
use crate::spatial::direction::{Direction, DirectionSet};
use crate::spatial::grid::Cell;

/// One verified Start-to-End traversal with its rotation assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPathInfo {
    /// Cells from Start to End inclusive
    pub path_positions: Vec<Cell>,
    /// Rotation of every path cell except possibly End
    ///
    /// End is recorded only when some rotation of it faces the last step.
    pub rotations: BTreeMap<Cell, u8>,
}

impl SolutionPathInfo {
    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.path_positions.len()
    }

    /// Whether the path has no cells
    pub fn is_empty(&self) -> bool {
        self.path_positions.is_empty()
    }

    /// Whether the recorded rotations really chain Start to End
    ///
    /// Every consecutive pair must be rook-adjacent, the earlier cell must
    /// open towards the later one, and the later one (unless it is End) must
    /// open back.
    pub fn verify(&self, snapshot: &OpeningsSnapshot, start: Cell, end: Cell) -> bool {
        if self.path_positions.first() != Some(&start) || self.path_positions.last() != Some(&end) {
            return false;
        }
        let opens = |cell: Cell, direction: Direction| {
            self.rotations
                .get(&cell)
                .is_some_and(|&rotation| snapshot.get(cell).rotated(rotation).contains(direction))
        };

        self.path_positions.windows(2).all(|pair| {
            let [from, to] = pair else {
                return false;
            };
            let Some(direction) = from.direction_to(*to) else {
                return false;
            };
            opens(*from, direction) && (*to == end || opens(*to, direction.opposite()))
        })
    }
}

/// Caps on the work one search may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Moves the search may try
    pub max_steps: usize,
    /// Solutions the all-paths search may collect
    pub max_results: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_SEARCH_STEPS,
            max_results: DEFAULT_MAX_SOLUTIONS,
        }
    }
}

impl SearchBudget {
    /// Budget with no caps
    pub const fn unlimited() -> Self {
        Self {
            max_steps: usize::MAX,
            max_results: usize::MAX,
        }
    }
}

/// Result of a budgeted search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    /// What was found
    pub result: T,
    /// Steps spent
    pub steps: usize,
    /// Whether the budget cut the search short
    pub truncated: bool,
}

// How many moves a frame expands into
#[derive(Clone, Copy, PartialEq, Eq)]
enum MoveSet {
    Collapsed,
    EveryRotation,
}

struct Frame {
    cell: Cell,
    moves: Vec<(u8, Direction)>,
    next: usize,
    rotation: u8,
}

impl Frame {
    fn new(snapshot: &OpeningsSnapshot, cell: Cell, incoming: Option<Direction>, expansion: MoveSet) -> Self {
        let base = snapshot.get(cell);
        let keeps_entry = |rotation: &u8| incoming.is_none_or(|d| base.rotated(*rotation).contains(d));
        let moves = match expansion {
            // One move per outgoing direction, at the first rotation that keeps the entry open
            MoveSet::Collapsed => Direction::ALL
                .into_iter()
                .filter(|&outgoing| Some(outgoing) != incoming)
                .filter_map(|outgoing| {
                    (0..4)
                        .filter(|rotation| keeps_entry(rotation))
                        .find(|&rotation| base.rotated(rotation).contains(outgoing))
                        .map(|rotation| (rotation, outgoing))
                })
                .collect(),
            // One move per (rotation, outgoing) pair; rotations repeating an opening set are skipped
            MoveSet::EveryRotation => {
                let mut seen: Vec<DirectionSet> = Vec::with_capacity(4);
                let mut moves = Vec::new();
                for rotation in (0..4).filter(|rotation| keeps_entry(rotation)) {
                    let openings = base.rotated(rotation);
                    if seen.contains(&openings) {
                        continue;
                    }
                    seen.push(openings);
                    moves.extend(
                        openings
                            .iter()
                            .filter(|&outgoing| Some(outgoing) != incoming)
                            .map(|outgoing| (rotation, outgoing)),
                    );
                }
                moves
            }
        };
        Self {
            cell,
            moves,
            next: 0,
            rotation: 0,
        }
    }
}

fn snapshot_solution(stack: &[Frame], snapshot: &OpeningsSnapshot, end: Cell, entry: Direction) -> SolutionPathInfo {
    let mut path_positions: Vec<Cell> = stack.iter().map(|frame| frame.cell).collect();
    let mut rotations: BTreeMap<Cell, u8> = stack.iter().map(|frame| (frame.cell, frame.rotation)).collect();
    path_positions.push(end);
    if let Some(rotation) = snapshot.rotation_exposing(end, entry) {
        rotations.insert(end, rotation);
    }
    SolutionPathInfo {
        path_positions,
        rotations,
    }
}

// Shared driver; `on_solution` returns false to stop the search
fn search(
    snapshot: &OpeningsSnapshot,
    start: Cell,
    end: Cell,
    max_steps: usize,
    moves: MoveSet,
    mut on_solution: impl FnMut(SolutionPathInfo) -> bool,
) -> (usize, bool) {
    let grid = snapshot.grid();
    if !grid.contains(start) || !grid.contains(end) {
        return (0, false);
    }
    if start == end {
        let mut rotations = BTreeMap::new();
        rotations.insert(start, 0);
        on_solution(SolutionPathInfo {
            path_positions: vec![start],
            rotations,
        });
        return (0, false);
    }

    let mut visited = CellBitset::new(grid);
    visited.insert(start);
    let mut stack = vec![Frame::new(snapshot, start, None, moves)];
    let mut steps = 0usize;

    while let Some(frame) = stack.last_mut() {
        let Some(&(rotation, direction)) = frame.moves.get(frame.next) else {
            visited.remove(frame.cell);
            stack.pop();
            continue;
        };
        if steps >= max_steps {
            return (steps, true);
        }
        steps += 1;
        frame.next += 1;
        frame.rotation = rotation;

        let Some(neighbor) = grid.neighbor(frame.cell, direction) else {
            continue;
        };
        if visited.contains(neighbor) {
            continue;
        }
        let entry = direction.opposite();
        if neighbor == end {
            if !on_solution(snapshot_solution(&stack, snapshot, end, entry)) {
                return (steps, false);
            }
            continue;
        }
        if snapshot.rotation_exposing(neighbor, entry).is_none() {
            continue;
        }
        visited.insert(neighbor);
        stack.push(Frame::new(snapshot, neighbor, Some(entry), moves));
    }

    (steps, false)
}

/// First Start-to-End solution found within the budget
pub fn find_solution_path(
    snapshot: &OpeningsSnapshot,
    start: Cell,
    end: Cell,
    budget: SearchBudget,
) -> SearchOutcome<Option<SolutionPathInfo>> {
    let mut found = None;
    let (steps, truncated) = search(snapshot, start, end, budget.max_steps, MoveSet::Collapsed, |solution| {
        found = Some(solution);
        false
    });
    if truncated {
        warn!("Solvability search stopped after {steps} steps without an answer");
    }
    SearchOutcome {
        result: found,
        steps,
        truncated,
    }
}

/// Whether any rotation assignment connects Start to End
///
/// Uses the default budget; a search cut short by it reports `false`.
pub fn exists_solution_path(snapshot: &OpeningsSnapshot, start: Cell, end: Cell) -> bool {
    find_solution_path(snapshot, start, end, SearchBudget::default())
        .result
        .is_some()
}

/// Every Start-to-End solution, up to the budget's result cap
///
/// Solutions differing only in the rotation of a path cell are reported
/// separately, unless the rotations expose the same openings.
pub fn find_all_solution_paths(
    snapshot: &OpeningsSnapshot,
    start: Cell,
    end: Cell,
    budget: SearchBudget,
) -> SearchOutcome<Vec<SolutionPathInfo>> {
    let mut solutions = Vec::new();
    let mut capped = false;
    let (steps, truncated) = search(snapshot, start, end, budget.max_steps, MoveSet::EveryRotation, |solution| {
        solutions.push(solution);
        if solutions.len() >= budget.max_results {
            capped = true;
            false
        } else {
            true
        }
    });

    let truncated = truncated || capped;
    if truncated {
        warn!(
            "All-paths search truncated after {steps} steps with {} solutions",
            solutions.len()
        );
    } else {
        debug!("All-paths search found {} solutions in {steps} steps", solutions.len());
    }
    SearchOutcome {
        result: solutions,
        steps,
        truncated,
    }
}
