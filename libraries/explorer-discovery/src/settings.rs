//! Discovery client settings
//!
//! Deserialized from the `[discovery]` table of the server configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const LASTFM_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEEZER_BASE_URL: &str = "https://api.deezer.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoverySettings {
    /// Last.fm API key. Requests fall back to a demo key without one.
    #[serde(default)]
    pub lastfm_api_key: Option<String>,

    #[serde(default = "default_lastfm_base_url")]
    pub lastfm_base_url: String,

    #[serde(default = "default_deezer_base_url")]
    pub deezer_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_lastfm_base_url() -> String {
    LASTFM_BASE_URL.to_string()
}

fn default_deezer_base_url() -> String {
    DEEZER_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            lastfm_api_key: None,
            lastfm_base_url: default_lastfm_base_url(),
            deezer_base_url: default_deezer_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DiscoverySettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
