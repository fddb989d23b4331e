//! Tests for grid extent, coordinates and neighbourhoods

#[cfg(test)]
mod tests {
    use pipeflow::spatial::direction::Direction;
    use pipeflow::spatial::grid::{Cell, Grid, Quadrant};

    // Tests bounds checks at every edge
    // Verified by using <= in the width comparison
    #[test]
    fn test_contains_edges() {
        let grid = Grid::new(4, 3);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(3, 2)));
        assert!(!grid.contains(Cell::new(4, 0)));
        assert!(!grid.contains(Cell::new(0, 3)));
        assert!(!grid.contains(Cell::new(-1, 1)));
    }

    // Tests that corner cells only report in-bounds neighbours
    // Verified by skipping the bounds filter in neighbors
    #[test]
    fn test_neighbors_at_corner() {
        let grid = Grid::new(3, 3);
        let around: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(
            around,
            vec![
                (Direction::North, Cell::new(0, 1)),
                (Direction::East, Cell::new(1, 0)),
            ]
        );
        assert_eq!(grid.neighbors(Cell::new(1, 1)).count(), 4);
        assert_eq!(grid.neighbor(Cell::new(2, 2), Direction::North), None);
    }

    // Tests linear and array indexing round trips
    // Verified by swapping x and y in array_index
    #[test]
    fn test_indexing() {
        let grid = Grid::new(5, 2);
        let cell = Cell::new(3, 1);
        assert_eq!(grid.index(cell), Some(8));
        assert_eq!(grid.cell_at(8), Some(cell));
        assert_eq!(grid.array_index(cell), Some([1, 3]));
        assert_eq!(grid.cell_at(10), None);
        assert_eq!(grid.index(Cell::new(5, 0)), None);
        assert_eq!(grid.shape(), (2, 5));
    }

    // Tests that cells are produced row-major, bottom row first
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_cells_order() {
        let grid = Grid::new(2, 2);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
            ]
        );
        assert_eq!(grid.cell_count(), 4);
    }

    // Tests the three distance measures and adjacency direction
    // Verified by returning the sum in chebyshev
    #[test]
    fn test_distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.direction_to(Cell::new(0, 1)), Some(Direction::North));
        assert_eq!(a.direction_to(Cell::new(1, 1)), None);
    }

    // Tests margin clamping and its fallback on narrow grids
    // Verified by ignoring the margin
    #[test]
    fn test_clamp_with_margin() {
        let grid = Grid::new(10, 3);
        assert_eq!(grid.clamp(Cell::new(-4, 9), 2), Cell::new(2, 2));
        assert_eq!(grid.clamp(Cell::new(12, 1), 2), Cell::new(7, 1));
    }

    // Tests that quadrants partition the grid
    // Verified by using inclusive upper bounds
    #[test]
    fn test_quadrants_partition_grid() {
        let grid = Grid::new(5, 4);
        let mut covered = 0;
        for quadrant in Quadrant::ALL {
            let (xs, ys) = grid.quadrant_ranges(quadrant);
            covered += xs.len() * ys.len();
        }
        assert_eq!(covered, grid.cell_count());
        assert_eq!(grid.quadrant_ranges(Quadrant::BottomLeft), (0..2, 0..2));
        assert_eq!(grid.quadrant_ranges(Quadrant::TopRight), (2..5, 2..4));
    }
}
