//! Tests for the planning grid

#[cfg(test)]
mod tests {
    use pipeflow::generation::plan::PlanningGrid;
    use pipeflow::spatial::direction::{Direction, DirectionSet};
    use pipeflow::spatial::grid::{Cell, Grid};

    // Tests the difference between unplanned and planned-empty cells
    // Verified by storing EMPTY for unplanned cells
    #[test]
    fn test_unplanned_versus_empty() {
        let mut planning = PlanningGrid::new(Grid::new(3, 3));
        let cell = Cell::new(1, 1);
        assert!(!planning.is_planned(cell));
        planning.set(cell, DirectionSet::EMPTY);
        assert!(planning.is_planned(cell));
        assert_eq!(planning.get(cell), Some(DirectionSet::EMPTY));
        assert_eq!(planning.planned_cells(), vec![cell]);
        assert_eq!(planning.unplanned_cells().len(), 8);
    }

    // Tests that merges union openings
    // Verified by replacing instead of merging
    #[test]
    fn test_merge_unions() {
        let mut planning = PlanningGrid::new(Grid::new(3, 3));
        let cell = Cell::new(0, 1);
        planning.merge(cell, DirectionSet::from_codes(&[1, 3]));
        planning.merge(cell, DirectionSet::from_codes(&[2]));
        assert_eq!(planning.get(cell), Some(DirectionSet::from_codes(&[1, 2, 3])));
        planning.remove_direction(cell, Direction::North);
        planning.add_direction(cell, Direction::West);
        assert_eq!(planning.get(cell), Some(DirectionSet::from_codes(&[2, 3, 4])));
    }

    // Tests that removing from an unplanned cell leaves it unplanned
    // Verified by planning the cell on removal
    #[test]
    fn test_remove_from_unplanned() {
        let mut planning = PlanningGrid::new(Grid::new(3, 3));
        planning.remove_direction(Cell::new(2, 2), Direction::East);
        assert!(!planning.is_planned(Cell::new(2, 2)));
        planning.set(Cell::new(5, 5), DirectionSet::ALL);
        assert!(planning.planned_cells().is_empty());
    }

    // Tests detection of openings that leave the grid
    // Verified by checking only the North edge
    #[test]
    fn test_off_grid_openings() {
        let mut planning = PlanningGrid::new(Grid::new(3, 3));
        planning.set(Cell::new(0, 0), DirectionSet::from_codes(&[2, 3]));
        planning.set(Cell::new(1, 1), DirectionSet::ALL);
        assert_eq!(
            planning.off_grid_openings(),
            vec![(Cell::new(0, 0), Direction::South)]
        );
    }
}
