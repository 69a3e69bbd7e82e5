/// Server configuration
use crate::error::{Result, ServerError};
use explorer_discovery::DiscoverySettings;
use explorer_storage::StorageSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `EXPLORER_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "EXPLORER";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub discovery: DiscoverySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `config.toml` in the working
    /// directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (EXPLORER_STORAGE__MONGODB_URI, ...)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply overrides taken from the command line or well-known variables
    pub fn with_overrides(
        mut self,
        mongodb_uri: Option<String>,
        lastfm_api_key: Option<String>,
    ) -> Self {
        if let Some(uri) = mongodb_uri.filter(|uri| !uri.trim().is_empty()) {
            self.storage.mongodb_uri = Some(uri);
        }
        if let Some(key) = lastfm_api_key.filter(|key| !key.trim().is_empty()) {
            self.discovery.lastfm_api_key = Some(key);
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "server.host must be an IP address, got {:?}",
                self.server.host
            )));
        }

        if self.storage.operation_timeout_secs == 0 {
            return Err(ServerError::Config(
                "storage.operation_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.discovery.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "discovery.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}
