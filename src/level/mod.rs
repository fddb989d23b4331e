//! Playable levels: realized boards, generation and campaign progress

/// Realized tile grid
pub mod board;
/// Generation orchestrator with fallback
pub mod generator;
/// Current-level counter and stores
pub mod progress;

pub use board::Board;
pub use generator::{GeneratedLevel, GeneratorConfig, LevelGenerator};
