/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/health - Health check endpoint
///
/// Reports "degraded" when the storage backend does not answer a ping.
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let status = match app_state.storage.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Storage ping failed: {}", e);
            "degraded"
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: app_state.storage.kind().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
