/// Shared application state
use crate::config::ServerConfig;
use crate::error::Result;
use explorer_discovery::{DeezerClient, LastfmClient};
use explorer_storage::Backend;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Backend>,
    pub lastfm: Arc<LastfmClient>,
    pub deezer: Arc<DeezerClient>,
}

impl AppState {
    pub fn new(
        storage: Arc<Backend>,
        lastfm: Arc<LastfmClient>,
        deezer: Arc<DeezerClient>,
    ) -> Self {
        Self {
            storage,
            lastfm,
            deezer,
        }
    }

    /// Build the discovery clients from `config` around an existing backend
    pub fn from_config(config: &ServerConfig, storage: Arc<Backend>) -> Result<Self> {
        let lastfm = LastfmClient::from_settings(&config.discovery)?;
        if lastfm.uses_demo_key() {
            tracing::warn!("LASTFM_API_KEY not set, chart and search requests will be rejected");
        }
        let deezer = DeezerClient::from_settings(&config.discovery)?;

        Ok(Self::new(storage, Arc::new(lastfm), Arc::new(deezer)))
    }
}
