/// Storage-specific errors
use explorer_core::ExplorerError;
use mongodb::error::{ErrorKind, WriteFailure};
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// MongoDB error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Invalid or incomplete storage settings
    #[error("Storage configuration error: {0}")]
    Config(String),

    /// Error reported by the MongoDB driver
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    /// A round trip did not finish within the configured bound
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// A stored document could not be converted to or from an entity
    #[error("Document conversion error: {0}")]
    Conversion(String),

    /// A uniqueness rule checked before writing was violated
    #[error("{0}")]
    Conflict(String),
}

impl StorageError {
    pub fn timeout(operation: &'static str, timeout: Duration) -> Self {
        Self::Timeout { operation, timeout }
    }

    /// Whether the failure is a network/availability problem rather than a
    /// problem with the request itself
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Database(err) => matches!(
                err.kind.as_ref(),
                ErrorKind::Io(_)
                    | ErrorKind::ServerSelection { .. }
                    | ErrorKind::ConnectionPoolCleared { .. }
                    | ErrorKind::DnsResolve { .. }
            ),
            Self::Config(_) | Self::Conversion(_) | Self::Conflict(_) => false,
        }
    }

    /// Whether the failure is a uniqueness violation, detected up front or
    /// reported by a unique index
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Database(err) => matches!(
                err.kind.as_ref(),
                ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
            ),
            Self::Conflict(_) => true,
            _ => false,
        }
    }
}

impl From<mongodb::bson::ser::Error> for StorageError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Conversion(err.to_string())
    }
}

impl From<StorageError> for ExplorerError {
    fn from(err: StorageError) -> Self {
        if err.is_unavailable() {
            ExplorerError::unavailable(err.to_string())
        } else if err.is_conflict() {
            ExplorerError::conflict(err.to_string())
        } else {
            ExplorerError::storage(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_surface_as_unavailable() {
        let err: ExplorerError =
            StorageError::timeout("find playlist", Duration::from_secs(5)).into();
        assert!(err.is_transient());
        assert!(err.to_string().contains("find playlist"));
    }

    #[test]
    fn conversion_errors_are_not_transient() {
        let err: ExplorerError = StorageError::Conversion("bad document".into()).into();
        assert!(!err.is_transient());
        assert!(matches!(err, ExplorerError::Storage(_)));
    }
}
