//! Tests for the level planner stages

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pipeflow::generation::path::Path;
    use pipeflow::generation::plan::PlanningGrid;
    use pipeflow::generation::planner::{LevelPlanner, assemble_tiles, check_dimension};
    use pipeflow::math::probability::RandomSelector;
    use pipeflow::spatial::direction::DirectionSet;
    use pipeflow::spatial::grid::{Cell, Grid};
    use pipeflow::spatial::tiles::Archetype;

    // Tests rejection of unsupported sizes and ratings
    // Verified by lowering MIN_GRID_DIMENSION to 1
    #[test]
    fn test_planner_rejects_bad_configuration() {
        assert!(LevelPlanner::new(2, 8, 5).is_err());
        assert!(LevelPlanner::new(8, 65, 5).is_err());
        assert!(LevelPlanner::new(8, 8, 0).is_err());
        assert!(LevelPlanner::new(8, 8, 11).is_err());
        assert!(check_dimension("width", 3).is_ok());
        assert!(check_dimension("width", 64).is_ok());
    }

    // Tests that every plan covers each cell exactly once with correct endpoints
    // Verified by skipping empty cells in assemble_tiles
    #[test]
    fn test_plan_is_complete() {
        for rating in [1, 4, 7, 10] {
            let planner = LevelPlanner::new(8, 7, rating).expect("valid planner");
            for seed in 0..5 {
                let mut rng = RandomSelector::new(seed);
                let plan = planner.plan_level(&mut rng).expect("planning succeeds");
                let grid = plan.grid;

                assert_eq!(plan.tiles.len(), grid.cell_count());
                let cells: HashSet<Cell> = plan.tiles.iter().map(|tile| tile.cell).collect();
                assert_eq!(cells.len(), grid.cell_count());

                assert_ne!(plan.start, plan.end);
                assert_eq!(plan.tile(plan.start).map(|t| t.archetype), Some(Archetype::Start));
                assert_eq!(plan.tile(plan.end).map(|t| t.archetype), Some(Archetype::End));
                assert_eq!(plan.critical_path.first(), Some(plan.start));
                assert_eq!(plan.critical_path.last(), Some(plan.end));
                assert!(plan.critical_path.is_valid(&grid));
            }
        }
    }

    // Tests that key tiles are interior critical cells and flagged in tile plans
    // Verified by allowing key tiles at path index 0
    #[test]
    fn test_key_tiles_on_critical_path() {
        let planner = LevelPlanner::new(10, 10, 9).expect("valid planner");
        for seed in 0..5 {
            let mut rng = RandomSelector::new(seed);
            let plan = planner.plan_level(&mut rng).expect("planning succeeds");
            for &cell in &plan.key_tiles {
                assert!(plan.critical_path.contains(cell));
                assert_ne!(cell, plan.start);
                assert_ne!(cell, plan.end);
                assert!(plan.tile(cell).is_some_and(|t| t.key_tile && t.on_critical_path));
            }
        }
    }

    // Tests that critical cells never open off the grid
    // Verified by planning the start with an outward opening
    #[test]
    fn test_critical_openings_stay_on_grid() {
        let planner = LevelPlanner::new(6, 6, 6).expect("valid planner");
        for seed in 0..10 {
            let mut rng = RandomSelector::new(seed);
            let plan = planner.plan_level(&mut rng).expect("planning succeeds");
            for &cell in plan.critical_path.cells() {
                let openings = plan.tile(cell).map(|t| t.directions).unwrap_or_default();
                assert!(openings.iter().all(|d| plan.grid.neighbor(cell, d).is_some()));
            }
        }
    }

    // Tests that equal seeds plan identical levels
    // Verified by drawing from an unseeded generator
    #[test]
    fn test_planning_is_deterministic() {
        let planner = LevelPlanner::new(8, 8, 5).expect("valid planner");
        let a = planner.plan_level(&mut RandomSelector::new(77)).expect("planning succeeds");
        let b = planner.plan_level(&mut RandomSelector::new(77)).expect("planning succeeds");
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.critical_path, b.critical_path);
    }

    // Tests archetype choice, endpoint override and substitution in assembly
    // Verified by applying the substitution to endpoints
    #[test]
    fn test_assemble_tiles() {
        let grid = Grid::new(3, 3);
        let mut planning = PlanningGrid::new(grid);
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 0);
        let path = Path::new(vec![start, Cell::new(1, 0), end]);
        planning.set(start, DirectionSet::from_codes(&[2]));
        planning.set(Cell::new(1, 0), DirectionSet::from_codes(&[2, 4]));
        planning.set(end, DirectionSet::from_codes(&[4]));
        planning.set(Cell::new(1, 1), DirectionSet::ALL);

        let tiles = assemble_tiles(&planning, start, end, &path, &[Cell::new(1, 0)], |archetype| {
            if archetype == Archetype::Cross {
                Archetype::Tee
            } else {
                archetype
            }
        });

        assert_eq!(tiles.len(), 9);
        let find = |cell: Cell| tiles.iter().find(|t| t.cell == cell).copied();
        assert_eq!(find(start).map(|t| t.archetype), Some(Archetype::Start));
        assert_eq!(find(end).map(|t| t.archetype), Some(Archetype::End));
        assert!(find(Cell::new(1, 0)).is_some_and(|t| t.archetype == Archetype::Straight && t.key_tile));
        assert_eq!(find(Cell::new(1, 1)).map(|t| t.archetype), Some(Archetype::Tee));
        assert_eq!(find(Cell::new(2, 2)).map(|t| t.archetype), Some(Archetype::Empty));
        assert!(find(Cell::new(2, 2)).is_some_and(|t| !t.on_critical_path));
    }
}
