//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A path segment cannot be appended to the base URL.
    #[error("invalid path segment: {0}")]
    InvalidSegment(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
