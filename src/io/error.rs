//! Error types and context management for generation operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::grid::Cell;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum PipeflowError {
    /// A planning stage could not produce a consistent planning grid
    ///
    /// Occurs when:
    /// - The critical path has fewer than two cells
    /// - A required direction points off the grid
    PlanningFailure {
        /// Planning stage that failed
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// The realized board has no rotation assignment connecting Start to End
    UnsolvableGrid {
        /// Generation attempt that produced the board (1-based)
        attempt: usize,
    },

    /// A tile archetype has no canonical openings in the registry
    MissingArchetypeMapping {
        /// Cell whose tile could not be mapped
        cell: Cell,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A persisted value could not be interpreted
    Persistence {
        /// Store key holding the value
        key: String,
        /// Description of the problem
        reason: String,
    },
}

impl fmt::Display for PipeflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlanningFailure { stage, reason } => {
                write!(f, "Planning failed during {stage}: {reason}")
            }
            Self::UnsolvableGrid { attempt } => {
                write!(f, "Generated grid is unsolvable (attempt {attempt})")
            }
            Self::MissingArchetypeMapping { cell } => {
                write!(f, "No archetype mapping for tile at {cell}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Persistence { key, reason } => {
                write!(f, "Stored value for '{key}' is unusable: {reason}")
            }
        }
    }
}

impl std::error::Error for PipeflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, PipeflowError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current generation attempt
    pub attempt: Option<usize>,
    /// Planning stage being performed
    pub stage: Option<&'static str>,
}

/// Enriches errors with generation state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the attempt number
    ///
    /// # Errors
    ///
    /// Propagates the original error with the attempt context applied
    fn with_attempt(self, attempt: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PipeflowError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                PipeflowError::UnsolvableGrid { attempt } => {
                    if let Some(value) = context.attempt {
                        *attempt = value;
                    }
                }
                PipeflowError::PlanningFailure { stage, .. } => {
                    if let Some(value) = context.stage {
                        *stage = value;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_attempt(self, attempt: usize) -> Result<T> {
        self.with_context(ErrorContext {
            attempt: Some(attempt),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for PipeflowError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PipeflowError {
    PipeflowError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a planning failure error
pub fn planning_failure(stage: &'static str, reason: &impl ToString) -> PipeflowError {
    PipeflowError::PlanningFailure {
        stage,
        reason: reason.to_string(),
    }
}

/// Create a file system error for a known path
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> PipeflowError {
    PipeflowError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
