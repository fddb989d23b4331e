//! Mathematical utilities for difficulty scaling and randomness

/// Linear interpolation and difficulty-rating helpers
pub mod interpolation;
/// Seeded random selection helpers
pub mod probability;
