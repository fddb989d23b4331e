//! Level planner: turns a difficulty rating into a complete tile plan
//!
//! Planning runs as a fixed sequence of stages over a [`PlanningGrid`]:
//! endpoint placement, critical path, key tiles, deceptive branches, path
//! directions, dead ends, key-tile gaps, remaining-cell fill, difficulty
//! validation with corrective passes, and finally conversion to tile plans.

use log::{debug, info};

use crate::generation::difficulty::DifficultyParameters;
use crate::generation::path::{Path, PathBuilder, random_direction};
use crate::generation::plan::{LevelPlan, PlanningGrid, TilePlan};
use crate::generation::validation::{adjust, validate};
use crate::io::configuration::{
    DEAD_END_PLACEMENT_ATTEMPTS, ENDPOINT_PLACEMENT_ATTEMPTS, FAKE_TARGET_ATTEMPTS,
    KEY_TILE_SPACING, MAX_DIFFICULTY_ADJUSTMENTS, MAX_GRID_DIMENSION, MIN_DECEPTIVE_LENGTH,
    MIN_GRID_DIMENSION, MIN_SUB_BRANCH_LENGTH,
};
use crate::io::error::{Result, invalid_parameter, planning_failure};
use crate::math::probability::RandomSelector;
use crate::spatial::direction::{Direction, DirectionSet};
use crate::spatial::grid::{Cell, Grid, Quadrant};
use crate::spatial::tiles::{Archetype, choose_archetype};

/// Chance of luring a deceptive branch towards the real end
const LURE_PROBABILITY: f64 = 0.7;
/// Chance of a fresh dead end becoming an anchor itself
const DEAD_END_CHAIN_PROBABILITY: f64 = 0.3;

/// Validate a grid dimension
///
/// # Errors
///
/// Returns an error if `value` is outside the supported range
pub fn check_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between {MIN_GRID_DIMENSION} and {MAX_GRID_DIMENSION}"),
        ))
    }
}

/// Build the tile-plan list for every grid cell in row-major order
///
/// Start and End always get their own archetypes. `substitute` may swap the
/// archetype chosen for any other cell.
pub fn assemble_tiles(
    planning: &PlanningGrid,
    start: Cell,
    end: Cell,
    critical_path: &Path,
    key_tiles: &[Cell],
    mut substitute: impl FnMut(Archetype) -> Archetype,
) -> Vec<TilePlan> {
    planning
        .grid()
        .cells()
        .map(|cell| {
            let directions = planning.get(cell).unwrap_or_default();
            let archetype = if cell == start {
                Archetype::Start
            } else if cell == end {
                Archetype::End
            } else {
                substitute(choose_archetype(directions))
            };
            TilePlan {
                cell,
                archetype,
                directions,
                on_critical_path: critical_path.contains(cell),
                key_tile: key_tiles.contains(&cell),
            }
        })
        .collect()
}

/// Plans levels of one size and difficulty
#[derive(Debug, Clone)]
pub struct LevelPlanner {
    parameters: DifficultyParameters,
}

impl LevelPlanner {
    /// Create a planner
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension or the difficulty is out of range
    pub fn new(width: usize, height: usize, difficulty: u8) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        let parameters = DifficultyParameters::from_rating(difficulty, Grid::new(width, height))?;
        Ok(Self { parameters })
    }

    /// Parameters derived from the difficulty rating
    pub const fn parameters(&self) -> &DifficultyParameters {
        &self.parameters
    }

    /// Run every planning stage
    ///
    /// # Errors
    ///
    /// Returns a planning failure if the critical path is shorter than two
    /// cells or leaves a required opening pointing off the grid
    pub fn plan_level(&self, rng: &mut RandomSelector) -> Result<LevelPlan> {
        let params = &self.parameters;
        let grid = params.grid;
        let builder = PathBuilder::new(params);

        let (start, end) = self.place_endpoints(rng);
        debug!("Start {start}, end {end}, distance {:.2}", start.distance(end));

        let mut critical_path = builder.build_path(start, end, rng);
        if critical_path.len() < 2 {
            return Err(planning_failure(
                "critical path",
                &format!("path from {start} to {end} has {} cells", critical_path.len()),
            ));
        }

        let key_tiles = self.identify_key_tiles(&critical_path, rng);

        let mut paths = vec![critical_path.clone()];
        paths.extend(self.deceptive_paths(&builder, &critical_path, end, rng));
        debug!("Planning {} paths including the critical path", paths.len());

        let mut planning = PlanningGrid::new(grid);
        Self::plan_paths(&mut planning, &paths, start, end);

        if params.plans_obstacles() {
            self.plan_dead_ends(&mut planning, start, end, rng);
            self.create_key_gaps(&mut planning, &key_tiles, rng);
        }

        self.fill_remaining(&mut planning, &critical_path, rng);

        let mut report = validate(&planning, &critical_path, start, end, params);
        let mut adjustments = 0;
        while !report.passed && adjustments < MAX_DIFFICULTY_ADJUSTMENTS {
            adjustments += 1;
            debug!("Difficulty validation failed, adjustment {adjustments}");
            adjust(&mut planning, &mut critical_path, &report, params, rng);
            report = validate(&planning, &critical_path, start, end, params);
        }

        for &cell in critical_path.cells() {
            let openings = planning.get(cell).unwrap_or_default();
            if let Some(direction) = openings.iter().find(|&d| grid.neighbor(cell, d).is_none()) {
                return Err(planning_failure(
                    "tile conversion",
                    &format!("critical cell {cell} opens {direction} off the grid"),
                ));
            }
        }

        let tiles = assemble_tiles(&planning, start, end, &critical_path, &key_tiles, |archetype| {
            if archetype == Archetype::Cross && rng.chance(params.cross_to_tee_probability) {
                Archetype::Tee
            } else {
                archetype
            }
        });

        info!(
            "Planned {}x{} level at difficulty {}: path {} cells, {} turns, {} key tiles, validation {}",
            grid.width(),
            grid.height(),
            params.rating,
            critical_path.len(),
            report.turns,
            key_tiles.len(),
            if report.passed { "passed" } else { "relaxed" }
        );

        Ok(LevelPlan {
            grid,
            start,
            end,
            critical_path,
            key_tiles,
            tiles,
            validation: report,
            difficulty: params.clone(),
        })
    }

    fn random_cell_in(&self, quadrant: Quadrant, rng: &mut RandomSelector) -> Cell {
        let (xs, ys) = self.parameters.grid.quadrant_ranges(quadrant);
        Cell::new(rng.range(xs.start, xs.end), rng.range(ys.start, ys.end))
    }

    // Distinct quadrants with the difficulty-scaled separation, else opposite corners
    fn place_endpoints(&self, rng: &mut RandomSelector) -> (Cell, Cell) {
        let grid = self.parameters.grid;
        let min_distance = self.parameters.min_separation();

        for _ in 0..ENDPOINT_PLACEMENT_ATTEMPTS {
            let Some(&start_quadrant) = rng.pick(&Quadrant::ALL) else {
                break;
            };
            let others: Vec<Quadrant> = Quadrant::ALL
                .into_iter()
                .filter(|&quadrant| quadrant != start_quadrant)
                .collect();
            let Some(&end_quadrant) = rng.pick(&others) else {
                break;
            };

            let start = self.random_cell_in(start_quadrant, rng);
            let end = self.random_cell_in(end_quadrant, rng);
            if start.distance(end) >= min_distance {
                return (start, end);
            }
        }

        debug!("No endpoints {min_distance:.2} apart, using opposite corners");
        (
            Cell::new(0, 0),
            Cell::new(grid.width() as i32 - 1, grid.height() as i32 - 1),
        )
    }

    fn identify_key_tiles(&self, path: &Path, rng: &mut RandomSelector) -> Vec<Cell> {
        let len = path.len();
        let count = self.parameters.key_tile_count(len);
        if len <= 2 || count == 0 {
            return Vec::new();
        }

        let mut indices: Vec<usize> = Vec::with_capacity(count);
        for _ in 0..count * 5 {
            if indices.len() >= count {
                break;
            }
            let index = rng.range(2, len as i32 - 2) as usize;
            let interior = index >= 1 && index + 1 < len;
            let spaced = indices
                .iter()
                .all(|&existing| existing.abs_diff(index) >= KEY_TILE_SPACING);
            if interior && spaced {
                indices.push(index);
            }
        }
        indices.sort_unstable();
        debug!("Key tiles at path indices {indices:?}");
        indices.into_iter().filter_map(|index| path.get(index)).collect()
    }

    fn deceptive_paths(
        &self,
        builder: &PathBuilder<'_>,
        critical_path: &Path,
        end: Cell,
        rng: &mut RandomSelector,
    ) -> Vec<Path> {
        let params = &self.parameters;
        let count = params.deceptive_path_count(critical_path.len());
        let mut candidates: Vec<usize> = (1..critical_path.len().saturating_sub(1)).collect();
        rng.shuffle(&mut candidates);

        let mut branches = Vec::new();
        for index in candidates.into_iter().take(count) {
            let Some(branch_start) = critical_path.get(index) else {
                continue;
            };
            let target = if params.lures_toward_end() && rng.chance(LURE_PROBABILITY) {
                self.fake_target_near_end(end, rng)
            } else {
                self.random_fake_target(branch_start, critical_path, rng)
            };

            let branch = builder.build_deceptive_path(branch_start, target, end, rng);
            if branch.len() <= MIN_DECEPTIVE_LENGTH {
                continue;
            }

            if params.allows_sub_branches() && rng.chance(params.misleading_path_probability) {
                for _ in 0..params.sub_branch_count {
                    let sub_index = rng.range(1, branch.len() as i32 - 2) as usize;
                    let Some(sub_start) = branch.get(sub_index) else {
                        continue;
                    };
                    let sub_target = self.random_fake_target(sub_start, &branch, rng);
                    let sub_branch = builder.build_deceptive_path(sub_start, sub_target, end, rng);
                    if sub_branch.len() > MIN_SUB_BRANCH_LENGTH {
                        branches.push(sub_branch);
                    }
                }
            }
            branches.push(branch);
        }
        branches
    }

    fn fake_target_near_end(&self, end: Cell, rng: &mut RandomSelector) -> Cell {
        let grid = self.parameters.grid;
        let target = grid.clamp(
            Cell::new(end.x + rng.range(-2, 3), end.y + rng.range(-2, 3)),
            1,
        );
        if target == end || target.distance(end) < 2.0 {
            let dx = if rng.chance(0.5) { -3 } else { 3 };
            let dy = if rng.chance(0.5) { -3 } else { 3 };
            grid.clamp(Cell::new(end.x + dx, end.y + dy), 1)
        } else {
            target
        }
    }

    fn random_fake_target(&self, source: Cell, avoid: &Path, rng: &mut RandomSelector) -> Cell {
        let params = &self.parameters;
        let spread = params.fake_target_spread;
        let mut target = source;
        for _ in 0..FAKE_TARGET_ATTEMPTS {
            target = params.grid.clamp(
                Cell::new(
                    source.x + rng.range(-spread, spread + 1),
                    source.y + rng.range(-spread, spread + 1),
                ),
                1,
            );
            if !avoid.contains(target) && source.distance(target) >= params.fake_target_min_distance {
                break;
            }
        }
        target
    }

    // Interior cells take the union of their path openings; endpoints face the critical path
    fn plan_paths(planning: &mut PlanningGrid, paths: &[Path], start: Cell, end: Cell) {
        for path in paths {
            for index in 1..path.len().saturating_sub(1) {
                let Some(cell) = path.get(index) else {
                    continue;
                };
                if cell != start && cell != end {
                    planning.merge(cell, path.directions_at(index));
                }
            }
        }

        if let Some(critical_path) = paths.first() {
            planning.set(start, critical_path.directions_at(0));
            planning.set(end, critical_path.directions_at(critical_path.len().saturating_sub(1)));
        }
    }

    fn plan_dead_ends(
        &self,
        planning: &mut PlanningGrid,
        start: Cell,
        end: Cell,
        rng: &mut RandomSelector,
    ) {
        let params = &self.parameters;
        let grid = params.grid;
        let min_degree = params.dead_end_anchor_degree();
        let mut anchors: Vec<Cell> = planning
            .planned_cells()
            .into_iter()
            .filter(|&cell| {
                cell != start
                    && cell != end
                    && planning.get(cell).is_some_and(|set| set.len() >= min_degree)
            })
            .collect();

        let target = params.planned_dead_ends;
        let mut placed = 0;
        for _ in 0..target * DEAD_END_PLACEMENT_ATTEMPTS {
            if placed >= target {
                break;
            }
            let Some(&anchor) = rng.pick(&anchors) else {
                break;
            };
            let used = planning.get(anchor).unwrap_or_default();
            let unused: Vec<Direction> = DirectionSet::ALL
                .iter()
                .filter(|&direction| !used.contains(direction))
                .collect();
            let Some(&direction) = rng.pick(&unused) else {
                continue;
            };
            let Some(neighbor) = grid.neighbor(anchor, direction) else {
                continue;
            };
            if planning.is_planned(neighbor) {
                continue;
            }

            planning.add_direction(anchor, direction);
            planning.set(neighbor, DirectionSet::EMPTY.with(direction.opposite()));
            placed += 1;
            if params.chains_dead_ends() && rng.chance(DEAD_END_CHAIN_PROBABILITY) {
                anchors.push(neighbor);
            }
        }
        debug!(
            "Planned {placed} of {target} dead ends (dead-end probability {:.2})",
            params.dead_end_probability
        );
    }

    fn create_key_gaps(&self, planning: &mut PlanningGrid, key_tiles: &[Cell], rng: &mut RandomSelector) {
        let Some(chances) = self.parameters.key_gaps else {
            return;
        };
        let max_emptied = chances.max_emptied(key_tiles.len());
        let mut emptied = 0;

        for &cell in key_tiles {
            let Some(directions) = planning.get(cell) else {
                continue;
            };
            if emptied < max_emptied && !directions.is_empty() && rng.chance(chances.empty) {
                planning.set(cell, DirectionSet::EMPTY);
                emptied += 1;
                debug!("Emptied key tile {cell} ({emptied}/{max_emptied})");
                continue;
            }
            if directions.len() > 1 && rng.chance(chances.reduce) && directions.len() > 2 {
                let reduced = reduce_to_pair(directions, rng);
                debug!("Reduced key tile {cell} from {directions} to {reduced}");
                planning.set(cell, reduced);
            }
        }
    }

    fn fill_remaining(&self, planning: &mut PlanningGrid, critical_path: &Path, rng: &mut RandomSelector) {
        let params = &self.parameters;
        let weights = params.fill;

        for cell in planning.unplanned_cells() {
            let nearest = critical_path
                .cells()
                .iter()
                .map(|&other| cell.distance(other))
                .fold(f64::INFINITY, f64::min);

            let mut empty = weights.empty;
            if params.rating > 5 {
                if nearest >= 3.0 {
                    empty = (empty + 0.2).min(0.7);
                }
                if params.rating >= 9 && nearest > 5.0 {
                    empty = (empty - 0.2).max(0.3);
                }
            }
            if nearest < 2.0 {
                empty *= 0.2;
            }

            let remaining = 1.0 - empty;
            let shape_weights = [
                empty,
                remaining * weights.straight,
                remaining * weights.corner,
                remaining * weights.tee,
                remaining * weights.cross,
            ];

            let directions = match rng.weighted_index(&shape_weights) {
                Some(1) => {
                    if rng.chance(0.5) {
                        DirectionSet::from_directions(&[Direction::North, Direction::South])
                    } else {
                        DirectionSet::from_directions(&[Direction::East, Direction::West])
                    }
                }
                Some(2) => {
                    let first = random_direction(rng);
                    let turn = if rng.chance(0.5) { 1 } else { 3 };
                    DirectionSet::from_directions(&[first, first.rotated(turn)])
                }
                Some(3) => DirectionSet::ALL.without(random_direction(rng)),
                Some(4) => DirectionSet::ALL,
                _ => DirectionSet::EMPTY,
            };
            planning.set(cell, directions);
        }
    }
}

// Keep an opposite pair when there is one, else an adjacent pair
fn reduce_to_pair(directions: DirectionSet, rng: &mut RandomSelector) -> DirectionSet {
    let vertical = DirectionSet::from_directions(&[Direction::North, Direction::South]);
    let horizontal = DirectionSet::from_directions(&[Direction::East, Direction::West]);
    for pair in [vertical, horizontal] {
        if directions.intersection(pair) == pair {
            return pair;
        }
    }

    let mut present: Vec<Direction> = directions.iter().collect();
    rng.shuffle(&mut present);
    for (i, &first) in present.iter().enumerate() {
        for &second in present.iter().skip(i + 1) {
            if second != first.opposite() {
                return DirectionSet::from_directions(&[first, second]);
            }
        }
    }
    directions
}
