//! Rectangular grid extent, cell coordinates and neighbourhood queries
//!
//! Cells are `(x, y)` with `0 <= x < width` and `0 <= y < height`; x grows
//! towards East and y grows towards North. Per-cell data is stored in
//! `ndarray` arrays shaped `(height, width)` and indexed `[y, x]`.

use std::fmt;
use std::ops::Range;

use crate::spatial::direction::Direction;

/// Integer grid coordinate
///
/// Coordinates are signed so that a neighbour one step outside the grid can
/// still be represented and rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column, growing towards East
    pub x: i32,
    /// Row, growing towards North
    pub y: i32,
}

impl Cell {
    /// Create a cell from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one unit away in `direction` (may lie outside any grid)
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Straight-line distance
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Chessboard distance, `max(|dx|, |dy|)`
    pub const fn chebyshev(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }

    /// Taxicab distance, `|dx| + |dy|`
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Direction of a rook-adjacent `other`, or `None` if not adjacent
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.step(direction) == other)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One quarter of the grid, split at `width / 2` and `height / 2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Low x, high y
    TopLeft,
    /// High x, high y
    TopRight,
    /// Low x, low y
    BottomLeft,
    /// High x, low y
    BottomRight,
}

impl Quadrant {
    /// All quadrants
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// Immutable `width x height` extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid extent
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// `(rows, cols)` shape for per-cell arrays
    pub const fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Bounds check
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// In-bounds neighbour of `cell` in `direction`
    pub const fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let next = cell.step(direction);
        if self.contains(next) { Some(next) } else { None }
    }

    /// Row-major linear index, `y * width + x`
    pub const fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    /// `[y, x]` index into a `(height, width)` array
    pub const fn array_index(&self, cell: Cell) -> Option<[usize; 2]> {
        if self.contains(cell) {
            Some([cell.y as usize, cell.x as usize])
        } else {
            None
        }
    }

    /// Inverse of [`Grid::index`]
    pub const fn cell_at(&self, index: usize) -> Option<Cell> {
        if self.width == 0 || index >= self.cell_count() {
            return None;
        }
        Some(Cell::new(
            (index % self.width) as i32,
            (index / self.width) as i32,
        ))
    }

    /// All cells in row-major order, bottom row first
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Cell::new(x as i32, y as i32)))
    }

    /// In-bounds rook neighbours with the direction leading to each
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> {
        let grid = *self;
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| grid.neighbor(cell, direction).map(|n| (direction, n)))
    }

    /// Length of the grid diagonal in cells
    pub fn diagonal(&self) -> f64 {
        (self.width as f64).hypot(self.height as f64)
    }

    /// Clamp both coordinates into `[margin, extent - 1 - margin]`
    ///
    /// Falls back to the plain grid bounds when the margin would leave no room.
    pub fn clamp(&self, cell: Cell, margin: i32) -> Cell {
        let clamp_axis = |value: i32, extent: usize| {
            let max = extent as i32 - 1;
            let (low, high) = if max - margin >= margin {
                (margin, max - margin)
            } else {
                (0, max)
            };
            value.clamp(low, high.max(0))
        };
        Cell::new(clamp_axis(cell.x, self.width), clamp_axis(cell.y, self.height))
    }

    /// Coordinate ranges `(x, y)` covered by a quadrant
    pub const fn quadrant_ranges(&self, quadrant: Quadrant) -> (Range<i32>, Range<i32>) {
        let half_width = (self.width / 2) as i32;
        let half_height = (self.height / 2) as i32;
        let width = self.width as i32;
        let height = self.height as i32;
        match quadrant {
            Quadrant::TopLeft => (0..half_width, half_height..height),
            Quadrant::TopRight => (half_width..width, half_height..height),
            Quadrant::BottomLeft => (0..half_width, 0..half_height),
            Quadrant::BottomRight => (half_width..width, 0..half_height),
        }
    }
}
