//! Tests for plain-text level export

#[cfg(test)]
mod tests {
    use pipeflow::generation::difficulty::DifficultyParameters;
    use pipeflow::generation::fallback::fallback_plan;
    use pipeflow::io::text::{glyph, render_board, render_level};
    use pipeflow::level::board::Board;
    use pipeflow::level::generator::{GeneratorConfig, LevelGenerator};
    use pipeflow::spatial::direction::DirectionSet;
    use pipeflow::spatial::grid::{Cell, Grid};
    use pipeflow::spatial::tiles::StandardRegistry;

    // Tests glyphs for representative opening sets
    // Verified by swapping the North and South glyph bits
    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(DirectionSet::EMPTY), '·');
        assert_eq!(glyph(DirectionSet::from_codes(&[1, 3])), '│');
        assert_eq!(glyph(DirectionSet::from_codes(&[2, 4])), '─');
        assert_eq!(glyph(DirectionSet::from_codes(&[1, 2])), '└');
        assert_eq!(glyph(DirectionSet::from_codes(&[3, 4])), '┐');
        assert_eq!(glyph(DirectionSet::ALL), '┼');
    }

    // Tests that the board prints top row first with endpoint markers
    // Verified by printing the bottom row first
    #[test]
    fn test_render_board_layout() {
        let grid = Grid::new(5, 4);
        let params = DifficultyParameters::from_rating(3, grid).expect("rating in range");
        let board = Board::realize(&fallback_plan(&params), &StandardRegistry);
        let text = render_board(&board);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows, vec!["·····", "···E·", "·S─┘·", "·····"]);
    }

    // Tests that the level summary reports the target and the board
    // Verified by omitting the max fill line
    #[test]
    fn test_render_level_header() {
        let config = GeneratorConfig {
            width: 5,
            height: 5,
            difficulty: 2,
            ..GeneratorConfig::default()
        };
        let generator = LevelGenerator::new(config).expect("valid config");
        let level = generator.generate(8);
        let text = render_level(&level);
        assert!(text.starts_with("seed: 8\n"));
        assert!(text.contains("size: 5x5  difficulty: 2"));
        assert!(text.contains(&format!("max fillable tiles: {}", level.max_fillable_tiles)));
        assert!(text.contains('S'));
        assert!(text.contains('E'));
        assert_eq!(text.lines().filter(|line| line.chars().count() == 5).count(), 5);
        assert!(level.board.tile(Cell::new(0, 0)).is_some());
    }
}
