//! Generation unit tests

pub mod plan;
pub mod planner;
