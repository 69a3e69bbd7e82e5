/// Core error types for Music Explorer
use thiserror::Error;

/// Result type alias using `ExplorerError`
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Core error type for Music Explorer
///
/// Missing entities are not errors: lookups return `None` and mutations on a
/// missing parent return `false`.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The storage backend could not complete a round trip (network, timeout)
    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Uniqueness violation (e.g. username already registered)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExplorerError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a backend unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether retrying later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}
