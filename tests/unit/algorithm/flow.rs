//! Tests for water flow at current rotations

#[cfg(test)]
mod tests {
    use pipeflow::algorithm::flow::simulate_flow;
    use pipeflow::algorithm::openings::OpeningsSnapshot;
    use pipeflow::spatial::direction::DirectionSet;
    use pipeflow::spatial::grid::{Cell, Grid};

    const HORIZONTAL: DirectionSet = DirectionSet::from_bits(0b1010);

    // Tests flow along an aligned corridor
    // Verified by flowing through one-sided openings
    #[test]
    fn test_aligned_corridor_reaches_end() {
        let snapshot = OpeningsSnapshot::from_fn(Grid::new(5, 1), |_| HORIZONTAL);
        let flow = simulate_flow(&snapshot, Cell::new(0, 0), Cell::new(4, 0));
        assert!(flow.reached_end);
        assert_eq!(flow.filled_count(), 5);
        assert_eq!(flow.filled.first(), Some(&Cell::new(0, 0)));
        assert!(flow.is_complete(5));
        assert!(!flow.is_complete(6));
    }

    // Tests that a misrotated tile blocks the water
    // Verified by ignoring the neighbour's opening
    #[test]
    fn test_misrotated_tile_blocks_flow() {
        let snapshot = OpeningsSnapshot::from_fn(Grid::new(5, 1), |cell| {
            if cell.x == 2 { DirectionSet::from_codes(&[1, 3]) } else { HORIZONTAL }
        });
        let flow = simulate_flow(&snapshot, Cell::new(0, 0), Cell::new(4, 0));
        assert!(!flow.reached_end);
        assert_eq!(flow.filled, vec![Cell::new(0, 0), Cell::new(1, 0)]);
        assert!(!flow.is_complete(2));
    }

    // Tests that an off-grid start fills nothing
    // Verified by filling the start unconditionally
    #[test]
    fn test_off_grid_start() {
        let snapshot = OpeningsSnapshot::from_fn(Grid::new(3, 3), |_| DirectionSet::ALL);
        let flow = simulate_flow(&snapshot, Cell::new(-1, 0), Cell::new(2, 2));
        assert_eq!(flow.filled_count(), 0);
        assert!(!flow.reached_end);
    }
}
