//! Input/output operations and error handling

/// Command-line interface and batch driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Batch progress display
pub mod progress;
/// Plain-text level export
pub mod text;
