use crate::error::{DiscoveryError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// Shared reqwest client with a bounded timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(format!("MusicExplorer/{}", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Trim a trailing slash and require an http(s) scheme
pub(crate) fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(DiscoveryError::InvalidUrl("URL cannot be empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(DiscoveryError::InvalidUrl(format!(
            "{url} must start with http:// or https://"
        )));
    }
    Ok(url.to_string())
}

/// Parse a successful JSON body, or turn an error status into `Upstream`
pub(crate) async fn json_body(response: Response) -> Result<serde_json::Value> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| DiscoveryError::Parse(e.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(DiscoveryError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}
