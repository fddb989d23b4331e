//! Tile archetypes and per-cell tile blueprints
//!
//! An archetype is the unrotated connectivity shape of a tile. A blueprint
//! pairs the archetype's base openings with a rotation state; the rotated
//! openings are always derived from the base and never written back.

use std::fmt;

use crate::spatial::direction::{Direction, DirectionSet};

/// Unrotated connectivity shape of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Archetype {
    /// No openings
    Empty,
    /// Two opposite openings
    Straight,
    /// Two adjacent openings
    Corner,
    /// Three openings
    Tee,
    /// All four openings
    Cross,
    /// Level entry with a single opening
    Start,
    /// Level exit with a single opening
    End,
}

impl Archetype {
    /// Every archetype in id order
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::Straight,
        Self::Corner,
        Self::Tee,
        Self::Cross,
        Self::Start,
        Self::End,
    ];

    /// Stable numeric id (0..=6)
    pub const fn id(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Straight => 1,
            Self::Corner => 2,
            Self::Tee => 3,
            Self::Cross => 4,
            Self::Start => 5,
            Self::End => 6,
        }
    }

    /// Look up an archetype by id
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Empty),
            1 => Some(Self::Straight),
            2 => Some(Self::Corner),
            3 => Some(Self::Tee),
            4 => Some(Self::Cross),
            5 => Some(Self::Start),
            6 => Some(Self::End),
            _ => None,
        }
    }

    /// Canonical openings at rotation 0
    pub const fn canonical_openings(self) -> DirectionSet {
        // Bits: N=1, E=2, S=4, W=8
        match self {
            Self::Empty => DirectionSet::EMPTY,
            Self::Straight => DirectionSet::from_bits(0b0101),
            Self::Corner => DirectionSet::from_bits(0b0011),
            Self::Tee => DirectionSet::from_bits(0b0111),
            Self::Cross => DirectionSet::ALL,
            Self::Start => DirectionSet::from_bits(0b0001),
            Self::End => DirectionSet::from_bits(0b0100),
        }
    }

    /// Lower-case display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Straight => "straight",
            Self::Corner => "corner",
            Self::Tee => "tee",
            Self::Cross => "cross",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    /// Start or End
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of canonical unrotated openings per archetype
///
/// Returning `None` means the archetype has no known mapping; realization
/// then treats the tile as impassable.
pub trait ArchetypeRegistry {
    /// Canonical openings of `archetype`, if known
    fn openings(&self, archetype: Archetype) -> Option<DirectionSet>;
}

/// Registry backed by [`Archetype::canonical_openings`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRegistry;

impl ArchetypeRegistry for StandardRegistry {
    fn openings(&self, archetype: Archetype) -> Option<DirectionSet> {
        Some(archetype.canonical_openings())
    }
}

/// One cell's base openings plus its rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBlueprint {
    archetype: Archetype,
    base: DirectionSet,
    rotation: u8,
}

impl Default for TileBlueprint {
    fn default() -> Self {
        Self::new(Archetype::Empty, DirectionSet::EMPTY)
    }
}

impl TileBlueprint {
    /// Create a blueprint at rotation 0
    pub const fn new(archetype: Archetype, base: DirectionSet) -> Self {
        Self {
            archetype,
            base,
            rotation: 0,
        }
    }

    /// Same blueprint at a given rotation (taken modulo 4)
    #[must_use]
    pub const fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation % 4;
        self
    }

    /// Archetype the blueprint was realized from
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Unrotated openings
    pub const fn base_openings(&self) -> DirectionSet {
        self.base
    }

    /// Current rotation state (0..=3)
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Openings at the current rotation
    pub const fn openings(&self) -> DirectionSet {
        self.base.rotated(self.rotation)
    }

    /// Advance one quarter turn clockwise
    pub const fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Set the rotation state (taken modulo 4)
    pub const fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % 4;
    }
}

/// First rotation of `base` whose openings contain `direction`
pub fn rotation_exposing(base: DirectionSet, direction: Direction) -> Option<u8> {
    (0..4).find(|&rotation| base.rotated(rotation).contains(direction))
}

/// First rotation of `base` whose openings equal `required` exactly
pub fn rotation_matching(base: DirectionSet, required: DirectionSet) -> Option<u8> {
    (0..4).find(|&rotation| base.rotated(rotation) == required)
}

/// First rotation of `base` sharing at least one opening with `required`
pub fn rotation_overlapping(base: DirectionSet, required: DirectionSet) -> Option<u8> {
    (0..4).find(|&rotation| !base.rotated(rotation).intersection(required).is_empty())
}

/// Archetype that can realize a set of required directions
///
/// A single direction maps to a straight piece; its realization still
/// exposes the required direction.
pub const fn choose_archetype(required: DirectionSet) -> Archetype {
    match required.len() {
        0 => Archetype::Empty,
        1 => Archetype::Straight,
        2 if required.is_straight() => Archetype::Straight,
        2 => Archetype::Corner,
        3 => Archetype::Tee,
        _ => Archetype::Cross,
    }
}
