//! Stochastic single-cell-wide path construction
//!
//! The critical path is a randomized walk from start to end that prefers
//! direct steps with a difficulty-scaled bias, falling back to an L-shaped
//! route when the walk does not converge. Deceptive branches use the same
//! walk but aim at a fake target and deliberately stop short of it.

use log::{debug, warn};

use crate::algorithm::bitset::CellBitset;
use crate::generation::difficulty::DifficultyParameters;
use crate::io::configuration::WALK_CAP_FACTOR;
use crate::math::probability::RandomSelector;
use crate::spatial::direction::{Direction, DirectionSet};
use crate::spatial::grid::{Cell, Grid};

/// Chance of abandoning a stuck deceptive walk once it is long enough
const STUCK_STOP_PROBABILITY: f64 = 0.3;

/// Ordered, loop-free sequence of rook-adjacent cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Wrap a cell sequence
    pub const fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Cells in walk order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Last cell
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Cell at a path index
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Membership test
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Insert `cell` before path index `index`
    pub fn insert(&mut self, index: usize, cell: Cell) {
        if index <= self.cells.len() {
            self.cells.insert(index, cell);
        }
    }

    /// Number of direction changes along the path
    pub fn turns(&self) -> usize {
        self.cells
            .windows(3)
            .filter(|window| {
                let [prev, cur, next] = window else {
                    return false;
                };
                let incoming = (cur.x - prev.x, cur.y - prev.y);
                let outgoing = (next.x - cur.x, next.y - cur.y);
                incoming != outgoing && incoming != (-outgoing.0, -outgoing.1)
            })
            .count()
    }

    /// Required openings of the cell at `index`, from its path neighbours
    pub fn directions_at(&self, index: usize) -> DirectionSet {
        let Some(current) = self.get(index) else {
            return DirectionSet::EMPTY;
        };
        let previous = index.checked_sub(1).and_then(|i| self.get(i));
        gather_directions(previous, current, self.get(index + 1))
    }

    /// Whether the path is in bounds, loop-free and rook-connected
    pub fn is_valid(&self, grid: &Grid) -> bool {
        let mut seen = CellBitset::new(*grid);
        let all_fresh = self
            .cells
            .iter()
            .all(|&cell| grid.contains(cell) && seen.insert(cell));
        all_fresh
            && self
                .cells
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.manhattan(*b) == 1))
    }
}

/// Openings a cell needs to connect to its predecessor and successor
///
/// An opening exists towards any side on which the predecessor or successor
/// lies. A cell with a single neighbour gets a single opening.
pub fn gather_directions(previous: Option<Cell>, current: Cell, next: Option<Cell>) -> DirectionSet {
    let mut directions = DirectionSet::EMPTY;
    for other in [previous, next].into_iter().flatten() {
        if other.y > current.y {
            directions.insert(Direction::North);
        }
        if other.x > current.x {
            directions.insert(Direction::East);
        }
        if other.y < current.y {
            directions.insert(Direction::South);
        }
        if other.x < current.x {
            directions.insert(Direction::West);
        }
    }
    directions
}

// One axis-aligned step towards `target`, choosing an axis at random when both differ
fn direct_step(current: Cell, target: Cell, rng: &mut RandomSelector) -> Cell {
    let dx = (target.x - current.x).signum();
    let dy = (target.y - current.y).signum();
    if dx != 0 && dy != 0 {
        if rng.chance(0.5) {
            Cell::new(current.x + dx, current.y)
        } else {
            Cell::new(current.x, current.y + dy)
        }
    } else {
        Cell::new(current.x + dx, current.y + dy)
    }
}

/// Uniformly random cardinal direction
pub fn random_direction(rng: &mut RandomSelector) -> Direction {
    rng.pick(&Direction::ALL).copied().unwrap_or(Direction::North)
}

/// Deterministic all-x-then-all-y route between two cells
pub fn l_path(start: Cell, end: Cell) -> Path {
    let mut cells = vec![start];
    let mut current = start;
    while current.x != end.x {
        current = Cell::new(current.x + (end.x - current.x).signum(), current.y);
        cells.push(current);
    }
    while current.y != end.y {
        current = Cell::new(current.x, current.y + (end.y - current.y).signum());
        cells.push(current);
    }
    Path::new(cells)
}

/// Build a path from `start` to `end` with a randomized walk
///
/// Each step is direct with probability `bias` and uniformly random
/// otherwise. Moves leaving the grid or revisiting a cell are rejected. If the
/// walk does not reach `end` within `width * height * 2` iterations the
/// L-shaped route is returned instead, and if either endpoint lies outside
/// the grid the degenerate two-cell path `[start, end]`.
pub fn build_path(grid: &Grid, start: Cell, end: Cell, bias: f64, rng: &mut RandomSelector) -> Path {
    if !grid.contains(start) || !grid.contains(end) {
        warn!("Path endpoints {start} -> {end} outside {}x{} grid", grid.width(), grid.height());
        return Path::new(vec![start, end]);
    }
    if start == end {
        return Path::new(vec![start]);
    }

    let mut visited = CellBitset::new(*grid);
    visited.insert(start);
    let mut cells = vec![start];
    let mut current = start;

    for _ in 0..grid.cell_count() * WALK_CAP_FACTOR {
        if current == end {
            break;
        }
        let next = if rng.chance(bias) {
            direct_step(current, end, rng)
        } else {
            current.step(random_direction(rng))
        };
        if grid.contains(next) && visited.insert(next) {
            cells.push(next);
            current = next;
        }
    }

    if current == end {
        Path::new(cells)
    } else {
        debug!("Walk from {start} did not reach {end}, using L-shaped route");
        l_path(start, end)
    }
}

/// Path construction driven by difficulty parameters
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    parameters: &'a DifficultyParameters,
}

impl<'a> PathBuilder<'a> {
    /// Create a builder for one planning run
    pub const fn new(parameters: &'a DifficultyParameters) -> Self {
        Self { parameters }
    }

    /// Critical path from `start` to `end` using the direct-path bias
    pub fn build_path(&self, start: Cell, end: Cell, rng: &mut RandomSelector) -> Path {
        build_path(
            &self.parameters.grid,
            start,
            end,
            self.parameters.direct_path_bias,
            rng,
        )
    }

    /// Branch from `start` heading for `target` that never connects
    ///
    /// The walk never enters `level_end`. Once within Chebyshev distance 2
    /// of the target it stops with the difficulty-scaled stop probability,
    /// and when stuck after `deceptive_min_length` cells it may give up.
    pub fn build_deceptive_path(
        &self,
        start: Cell,
        target: Cell,
        level_end: Cell,
        rng: &mut RandomSelector,
    ) -> Path {
        let params = self.parameters;
        let grid = params.grid;
        let mut visited = CellBitset::new(grid);
        visited.insert(start);
        let mut cells = vec![start];
        let mut current = start;

        for _ in 0..params.max_path_length {
            let next = if rng.chance(params.path_straightness_bias) {
                direct_step(current, target, rng)
            } else if params.mimics_critical_path() {
                self.ranked_step(current, level_end, rng)
            } else {
                current.step(random_direction(rng))
            };

            if grid.contains(next) && next != level_end && !visited.contains(next) {
                visited.insert(next);
                cells.push(next);
                current = next;
                if current.chebyshev(target) <= 2 && rng.chance(params.deceptive_stop_probability) {
                    break;
                }
            } else if cells.len() > params.deceptive_min_length
                && rng.chance(STUCK_STOP_PROBABILITY)
            {
                break;
            }
        }

        Path::new(cells)
    }

    // Rank all four directions by noisy distance to the real end, then pick
    // uniformly from the top two only
    fn ranked_step(&self, current: Cell, level_end: Cell, rng: &mut RandomSelector) -> Cell {
        let mut ranked: Vec<(f64, Cell)> = Direction::ALL
            .into_iter()
            .map(|direction| {
                let candidate = current.step(direction);
                let score = rng.value().mul_add(
                    self.parameters.winding_factor,
                    candidate.distance(level_end),
                );
                (score, candidate)
            })
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        let choice = rng.index(2).unwrap_or(0);
        ranked.get(choice).map_or(current, |&(_, cell)| cell)
    }
}
