//! Tests for the rotation-aware solvability search

#[cfg(test)]
mod tests {
    use pipeflow::algorithm::openings::OpeningsSnapshot;
    use pipeflow::algorithm::solvability::{
        SearchBudget, exists_solution_path, find_all_solution_paths, find_solution_path,
    };
    use pipeflow::spatial::direction::DirectionSet;
    use pipeflow::spatial::grid::{Cell, Grid};
    use pipeflow::spatial::tiles::Archetype;

    fn straight_row(length: usize) -> OpeningsSnapshot {
        OpeningsSnapshot::from_fn(Grid::new(length, 3), |cell| {
            if cell.y == 1 {
                Archetype::Straight.canonical_openings()
            } else {
                DirectionSet::EMPTY
            }
        })
    }

    // Tests that an all-cross grid is solvable and the solution verifies
    // Verified by skipping the exposing check on neighbours
    #[test]
    fn test_cross_grid_solvable() {
        let grid = Grid::new(4, 4);
        let snapshot = OpeningsSnapshot::from_fn(grid, |_| DirectionSet::ALL);
        let start = Cell::new(1, 1);
        let end = Cell::new(2, 2);
        let outcome = find_solution_path(&snapshot, start, end, SearchBudget::default());
        let solution = outcome.result.expect("cross grid is solvable");
        assert!(solution.verify(&snapshot, start, end));
        assert!(!outcome.truncated);
        assert!(exists_solution_path(&snapshot, start, end));
    }

    // Tests that a start walled in by empty cells is unsolvable
    // Verified by treating empty neighbours as enterable
    #[test]
    fn test_isolated_start_unsolvable() {
        let grid = Grid::new(4, 4);
        let start = Cell::new(0, 0);
        let end = Cell::new(3, 3);
        let snapshot = OpeningsSnapshot::from_fn(grid, |cell| {
            if cell == start {
                DirectionSet::from_codes(&[2])
            } else if cell == end {
                Archetype::End.canonical_openings()
            } else {
                DirectionSet::EMPTY
            }
        });
        assert!(!exists_solution_path(&snapshot, start, end));
        let all = find_all_solution_paths(&snapshot, start, end, SearchBudget::default());
        assert!(all.result.is_empty());
    }

    // Tests that a straight corridor has exactly one solution
    // Verified by emitting one move per rotation instead of per direction
    #[test]
    fn test_straight_corridor_single_solution() {
        let snapshot = straight_row(6);
        let start = Cell::new(0, 1);
        let end = Cell::new(5, 1);
        let all = find_all_solution_paths(&snapshot, start, end, SearchBudget::unlimited());
        assert_eq!(all.result.len(), 1);
        assert!(!all.truncated);
        let solution = all.result.first().expect("one solution");
        assert_eq!(solution.len(), 6);
        assert_eq!(solution.rotations.get(&start), Some(&1));
        assert!(solution.verify(&snapshot, start, end));
    }

    // Tests that End is reachable whatever its own openings
    // Verified by requiring End to expose the entry direction
    #[test]
    fn test_end_entered_regardless_of_openings() {
        let grid = Grid::new(3, 3);
        let start = Cell::new(0, 1);
        let end = Cell::new(1, 1);
        let snapshot = OpeningsSnapshot::from_fn(grid, |cell| {
            if cell == start { DirectionSet::from_codes(&[1]) } else { DirectionSet::EMPTY }
        });
        let solution = find_solution_path(&snapshot, start, end, SearchBudget::default())
            .result
            .expect("end is adjacent");
        assert_eq!(solution.path_positions, vec![start, end]);
        assert!(!solution.rotations.contains_key(&end));
        assert!(solution.verify(&snapshot, start, end));
    }

    // Tests that every solution on an open grid is sound and loop-free
    // Verified by leaving cells marked visited after backtracking
    #[test]
    fn test_all_solutions_sound() {
        let grid = Grid::new(3, 3);
        let snapshot = OpeningsSnapshot::from_fn(grid, |_| DirectionSet::ALL);
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 2);
        let all = find_all_solution_paths(&snapshot, start, end, SearchBudget::unlimited());
        // Self-avoiding corner-to-corner walks on a 3x3 lattice
        assert_eq!(all.result.len(), 12);
        for solution in &all.result {
            assert!(solution.verify(&snapshot, start, end));
            let mut cells = solution.path_positions.clone();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), solution.len());
        }
    }

    // Tests truncation by step and result caps
    // Verified by ignoring max_results
    #[test]
    fn test_budget_truncation() {
        let grid = Grid::new(5, 5);
        let snapshot = OpeningsSnapshot::from_fn(grid, |_| DirectionSet::ALL);
        let start = Cell::new(0, 0);
        let end = Cell::new(4, 4);

        let capped = find_all_solution_paths(
            &snapshot,
            start,
            end,
            SearchBudget {
                max_steps: usize::MAX,
                max_results: 3,
            },
        );
        assert_eq!(capped.result.len(), 3);
        assert!(capped.truncated);

        let starved = find_solution_path(
            &snapshot,
            start,
            end,
            SearchBudget {
                max_steps: 2,
                max_results: 1,
            },
        );
        assert!(starved.result.is_none());
        assert!(starved.truncated);
        assert_eq!(starved.steps, 2);
    }

    // Tests trivial and out-of-grid endpoints
    // Verified by searching from an off-grid start
    #[test]
    fn test_degenerate_endpoints() {
        let snapshot = straight_row(4);
        let cell = Cell::new(1, 1);
        let trivial = find_solution_path(&snapshot, cell, cell, SearchBudget::default());
        assert_eq!(trivial.result.map(|s| s.len()), Some(1));
        assert!(!exists_solution_path(&snapshot, Cell::new(-1, 1), cell));
    }

    // Tests that verification rejects a tampered rotation
    // Verified by skipping the opens-back check in verify
    #[test]
    fn test_verify_rejects_bad_rotation() {
        let snapshot = straight_row(4);
        let start = Cell::new(0, 1);
        let end = Cell::new(3, 1);
        let mut solution = find_solution_path(&snapshot, start, end, SearchBudget::default())
            .result
            .expect("corridor is solvable");
        solution.rotations.insert(Cell::new(1, 1), 0);
        assert!(!solution.verify(&snapshot, start, end));
        assert!(!solution.verify(&snapshot, Cell::new(1, 1), end));
    }
}
