//! Plain-text export of generated levels

use std::fmt::Write as _;

use crate::level::board::Board;
use crate::level::generator::GeneratedLevel;
use crate::spatial::direction::DirectionSet;
use crate::spatial::grid::Cell;

// Indexed by opening bits: N=1, E=2, S=4, W=8
const GLYPHS: [char; 16] = [
    '·', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

/// Box-drawing glyph for a set of openings
pub fn glyph(openings: DirectionSet) -> char {
    GLYPHS
        .get(usize::from(openings.bits()))
        .copied()
        .unwrap_or('?')
}

/// Board at its current rotations, top row first; Start and End print as `S` and `E`
pub fn render_board(board: &Board) -> String {
    let grid = board.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let cell = Cell::new(x, y);
            let symbol = if cell == board.start() {
                'S'
            } else if cell == board.end() {
                'E'
            } else {
                board
                    .tile(cell)
                    .map_or('·', |tile| glyph(tile.openings()))
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

/// Summary header followed by the board
pub fn render_level(level: &GeneratedLevel) -> String {
    let plan = &level.plan;
    let flow = level.board.flow();
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "seed: {}", level.seed);
    let _ = writeln!(
        out,
        "size: {}x{}  difficulty: {}",
        plan.grid.width(),
        plan.grid.height(),
        plan.difficulty.rating
    );
    let _ = writeln!(out, "start: {}  end: {}", plan.start, plan.end);
    let _ = writeln!(
        out,
        "critical path: {} cells, {} turns, {} key tiles",
        plan.critical_path.len(),
        plan.critical_path.turns(),
        plan.key_tiles.len()
    );
    let _ = writeln!(
        out,
        "max fillable tiles: {}  current flow: {}{}",
        level.max_fillable_tiles,
        flow.filled_count(),
        if flow.is_complete(level.max_fillable_tiles) { " (complete)" } else { "" }
    );
    let _ = writeln!(
        out,
        "attempts: {}{}",
        level.attempts,
        if level.used_fallback { " (fallback level)" } else { "" }
    );
    out.push('\n');
    out.push_str(&render_board(&level.board));
    out
}
