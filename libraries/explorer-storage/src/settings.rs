//! Storage backend settings
//!
//! Deserialized from the `[storage]` table of the server configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Database used when neither the settings nor the connection string name one
pub const DEFAULT_DATABASE_NAME: &str = "music-explorer";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// MongoDB connection string. When absent the in-memory backend is used.
    #[serde(default)]
    pub mongodb_uri: Option<String>,

    /// Database name, overriding the one in the connection string
    #[serde(default)]
    pub database_name: Option<String>,

    /// Upper bound for a single document-store round trip
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,
}

fn default_operation_timeout_secs() -> u64 {
    5
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            mongodb_uri: None,
            database_name: None,
            operation_timeout_secs: default_operation_timeout_secs(),
        }
    }
}

impl StorageSettings {
    /// Settings selecting the document store at `uri`
    pub fn mongodb(uri: impl Into<String>) -> Self {
        Self {
            mongodb_uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Connection string, ignoring blank values
    pub fn connection_string(&self) -> Option<&str> {
        self.mongodb_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    /// Which backend these settings select
    pub fn backend_kind(&self) -> BackendKind {
        if self.connection_string().is_some() {
            BackendKind::Document
        } else {
            BackendKind::Memory
        }
    }
}

/// The two interchangeable storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local maps, lost on restart
    Memory,
    /// MongoDB collections
    Document,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Document => write!(f, "mongodb"),
        }
    }
}
