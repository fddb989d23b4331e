//! Spatial data structures for the puzzle grid
//!
//! This module contains spatial-related functionality including:
//! - Direction codes and compact direction sets
//! - Grid extent, cell coordinates and neighbourhoods
//! - Tile archetypes and rotatable tile blueprints

/// Cardinal directions and direction sets
pub mod direction;
/// Grid extent and cell coordinates
pub mod grid;
/// Tile archetypes, registry and blueprints
pub mod tiles;

pub use direction::{Direction, DirectionSet};
pub use grid::{Cell, Grid};
pub use tiles::{Archetype, TileBlueprint};
