//! Procedural level generator and solvability engine for pipe-rotation puzzles
//!
//! A level is a grid of tiles whose openings rotate in quarter turns. The
//! planner lays out a critical path from Start to End, hides it among
//! deceptive branches and dead ends, and fills the rest of the grid. The
//! searches then confirm that some rotation assignment connects Start to End
//! and measure the largest component a solution can flood.

#![forbid(unsafe_code)]

/// Solvability search, max-fill exploration and water flow
pub mod algorithm;
/// Difficulty scaling, path building and level planning
pub mod generation;
/// Input/output operations and error handling
pub mod io;
/// Realized boards, generation orchestration and level progress
pub mod level;
/// Interpolation and seeded randomness
pub mod math;
/// Directions, grid geometry and tile archetypes
pub mod spatial;

pub use io::error::{PipeflowError, Result};
