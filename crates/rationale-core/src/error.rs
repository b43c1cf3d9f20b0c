//! Error types for Rationale

use thiserror::Error;

/// Main error type for Rationale operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RationaleError {
    /// A string did not name one of the built-in aggregations
    #[error("unknown aggregation keyword: {0}")]
    UnknownAggregation(String),
}

/// Result type alias for Rationale operations
pub type Result<T> = std::result::Result<T, RationaleError>;
