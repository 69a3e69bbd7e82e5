//! Last.fm charts and search.

use crate::error::{DiscoveryError, Result};
use crate::http::{build_client, json_body, normalize_base_url};
use crate::settings::DiscoverySettings;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Key sent when no API key is configured. Last.fm rejects it, but the
/// request shape stays the same.
pub const DEMO_API_KEY: &str = "demo_key";

/// Client for the Last.fm 2.0 REST API.
///
/// Results are passed through as raw JSON so callers see exactly what
/// Last.fm returned.
#[derive(Debug, Clone)]
pub struct LastfmClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl LastfmClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let endpoint = format!("{}/", normalize_base_url(base_url)?);
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEMO_API_KEY.to_string());

        Ok(Self {
            http: build_client(timeout)?,
            endpoint,
            api_key,
        })
    }

    pub fn from_settings(settings: &DiscoverySettings) -> Result<Self> {
        Self::new(
            &settings.lastfm_base_url,
            settings.lastfm_api_key.clone(),
            settings.request_timeout(),
        )
    }

    /// Whether requests go out with the demo key
    pub fn uses_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }

    /// Most played tracks, globally or for one country
    pub async fn top_tracks(&self, country: Option<&str>, limit: u32) -> Result<Vec<Value>> {
        let (method, params) = match non_blank(country) {
            Some(country) => ("geo.gettoptracks", vec![("country", country.to_string())]),
            None => ("chart.gettoptracks", Vec::new()),
        };
        self.call(method, params, limit, "/tracks/track").await
    }

    /// Most played artists, globally or for one country
    pub async fn top_artists(&self, country: Option<&str>, limit: u32) -> Result<Vec<Value>> {
        let (method, params) = match non_blank(country) {
            Some(country) => ("geo.gettopartists", vec![("country", country.to_string())]),
            None => ("chart.gettopartists", Vec::new()),
        };
        self.call(method, params, limit, "/artists/artist").await
    }

    /// Tracks whose title matches `query`
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        let params = vec![("track", query.to_string())];
        self.call("track.search", params, limit, "/results/trackmatches/track")
            .await
    }

    async fn call(
        &self,
        method: &str,
        mut params: Vec<(&str, String)>,
        limit: u32,
        items: &str,
    ) -> Result<Vec<Value>> {
        params.extend([
            ("method", method.to_string()),
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
        ]);

        debug!(method, limit, "Calling Last.fm");

        let response = self.http.get(&self.endpoint).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = json_body(response).await?;

        // Last.fm reports API errors in the body, sometimes with a 200 status
        if let Some(code) = body.get("error").and_then(Value::as_i64) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(DiscoveryError::Upstream {
                status,
                message: format!("Last.fm error {code}: {message}"),
            });
        }

        Ok(items_at(&body, items))
    }
}

/// Items under `pointer`, empty when absent
///
/// A single result is sometimes returned as an object instead of a
/// one-element array.
fn items_at(body: &Value, pointer: &str) -> Vec<Value> {
    match body.pointer(pointer) {
        Some(Value::Array(items)) => items.clone(),
        Some(item @ Value::Object(_)) => vec![item.clone()],
        _ => Vec::new(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
