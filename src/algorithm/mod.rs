//! Solvability search, max-fill exploration and water flow

/// Cell membership bitsets
pub mod bitset;
/// Max-fill exploration over solution paths
pub mod fill;
/// Water flow at current rotations
pub mod flow;
/// Openings snapshots read by the searches
pub mod openings;
/// Rotation-aware Start-to-End search
pub mod solvability;

pub use openings::OpeningsSnapshot;
pub use solvability::{SearchBudget, SolutionPathInfo};
