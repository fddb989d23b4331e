//! Procedural level planning
//!
//! Turns a grid size and difficulty rating into a tile plan: critical path,
//! deceptive branches, dead ends, key-tile gaps and random fill, validated
//! against difficulty thresholds.

/// Difficulty-derived tuning parameters
pub mod difficulty;
/// Guaranteed-solvable fallback level
pub mod fallback;
/// Path type and randomized path construction
pub mod path;
/// Planning grid and tile plans
pub mod plan;
/// Staged level planner
pub mod planner;
/// Difficulty validation and adjustment
pub mod validation;

pub use plan::{LevelPlan, TilePlan};
pub use planner::LevelPlanner;
