//! Cardinal direction algebra for tile openings
//!
//! Directions carry the integer codes 1=North (+y), 2=East (+x), 3=South (-y)
//! and 4=West (-x). One rotation step turns a direction clockwise by 90°,
//! so North becomes East, East becomes South and so on.

use std::fmt;

/// One of the four cardinal directions a tile can open towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards +y
    North = 1,
    /// Towards +x
    East = 2,
    /// Towards -y
    South = 3,
    /// Towards -x
    West = 4,
}

impl Direction {
    /// All directions in code order (N, E, S, W)
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Look up a direction by its integer code (1..=4)
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::North),
            2 => Some(Self::East),
            3 => Some(Self::South),
            4 => Some(Self::West),
            _ => None,
        }
    }

    // Zero-based index wraps so callers can add rotation steps freely
    const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Integer code of the direction (1..=4)
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based index of the direction (0..=3)
    pub const fn index(self) -> u8 {
        self.code() - 1
    }

    /// The direction pointing the other way, `((d + 1) % 4) + 1`
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Rotate clockwise by `steps` quarter turns, `((d - 1 + steps) % 4) + 1`
    #[must_use]
    pub const fn rotated(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps % 4)
    }

    /// Unit offset `(dx, dy)` of a single step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Whether the direction runs along the y axis
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
        };
        f.write_str(label)
    }
}

/// Compact set of open directions
///
/// Bit `i` holds the direction with index `i`, so rotating the set is a
/// 4-bit rotate-left. Rotated openings are always derived from a base set,
/// never stored back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// The set with no openings
    pub const EMPTY: Self = Self(0);

    /// The set with all four openings
    pub const ALL: Self = Self(0b1111);

    /// Build a set from a raw bit pattern, keeping only the low four bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Build a set from a slice of directions
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions.iter().copied().collect()
    }

    /// Build a set from integer direction codes, ignoring codes outside 1..=4
    pub fn from_codes(codes: &[u8]) -> Self {
        codes
            .iter()
            .filter_map(|&code| Direction::from_code(code))
            .collect()
    }

    /// Raw bit pattern (bit 0 = North .. bit 3 = West)
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Test membership
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Copy of the set with `direction` added
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Copy of the set with `direction` removed
    #[must_use]
    pub const fn without(self, direction: Direction) -> Self {
        Self(self.0 & !direction.bit())
    }

    /// Add a direction in place
    pub const fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Remove a direction in place
    pub const fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Union of both sets
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of both sets
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Number of open directions
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no direction is open
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Openings after `steps` clockwise quarter turns
    #[must_use]
    pub const fn rotated(self, steps: u8) -> Self {
        let shift = steps % 4;
        Self(((self.0 << shift) | (self.0 >> (4 - shift))) & 0b1111)
    }

    /// Exactly two opposite openings
    pub const fn is_straight(self) -> bool {
        self.0 == 0b0101 || self.0 == 0b1010
    }

    /// Exactly two adjacent openings
    pub const fn is_corner(self) -> bool {
        self.len() == 2 && !self.is_straight()
    }

    /// Iterate open directions in code order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.contains(direction))
    }

    /// Integer codes of the open directions in ascending order
    pub fn to_codes(self) -> Vec<u8> {
        self.iter().map(Direction::code).collect()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let labels: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        f.write_str(&labels.join(","))
    }
}
