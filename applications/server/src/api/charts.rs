/// Last.fm chart and search routes
use super::{query_params, required};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// Results per request when the client does not ask for a number
const DEFAULT_LIMIT: u32 = 20;

/// Upper bound accepted by Last.fm
const MAX_LIMIT: u32 = 1000;

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// GET /api/charts/top-tracks?country=&limit=
pub async fn top_tracks(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>> {
    let query = query_params(query)?;
    let tracks = app_state
        .lastfm
        .top_tracks(query.country.as_deref(), clamp_limit(query.limit))
        .await?;
    Ok(Json(tracks))
}

/// GET /api/charts/top-artists?country=&limit=
pub async fn top_artists(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>> {
    let query = query_params(query)?;
    let artists = app_state
        .lastfm
        .top_artists(query.country.as_deref(), clamp_limit(query.limit))
        .await?;
    Ok(Json(artists))
}

/// GET /api/search/tracks?q=&limit=
pub async fn search_tracks(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>> {
    let query = query_params(query)?;
    let q = required(query.q.as_deref(), "Search query is required")?;

    let tracks = app_state
        .lastfm
        .search_tracks(q, clamp_limit(query.limit))
        .await?;
    Ok(Json(tracks))
}
