//! Deezer preview lookup.

use crate::error::{DiscoveryError, Result};
use crate::http::{build_client, json_body, normalize_base_url};
use crate::settings::DiscoverySettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// 30 second preview and artwork of the best Deezer match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeezerPreview {
    pub id: i64,
    #[serde(default)]
    pub preview: String,
    pub album: DeezerAlbum,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeezerAlbum {
    #[serde(default)]
    pub cover_medium: Option<String>,
    #[serde(default)]
    pub cover_small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<DeezerPreview>,
}

/// Client for the public Deezer search API (no key required)
#[derive(Debug, Clone)]
pub struct DeezerClient {
    http: Client,
    base_url: String,
}

impl DeezerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &DiscoverySettings) -> Result<Self> {
        Self::new(&settings.deezer_base_url, settings.request_timeout())
    }

    /// First search hit for "`artist` `track`", if any
    pub async fn find_preview(&self, artist: &str, track: &str) -> Result<Option<DeezerPreview>> {
        let url = format!("{}/search", self.base_url);
        let query = format!("{artist} {track}");
        debug!(query = %query, "Searching Deezer");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query.as_str()), ("limit", "1")])
            .send()
            .await?;

        let body = json_body(response).await?;
        let results: SearchResponse =
            serde_json::from_value(body).map_err(|e| DiscoveryError::Parse(e.to_string()))?;

        Ok(results.data.into_iter().next())
    }
}
