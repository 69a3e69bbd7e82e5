/// Tracks API routes
use super::{path_params, query_params, required};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use explorer_core::{
    storage::Storage,
    types::{Track, TrackId},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TrackSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/tracks/search?q=
/// Search stored tracks by name, artist or album
pub async fn search_tracks(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<TrackSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Track>>> {
    let query = query_params(query)?;
    let q = required(query.q.as_deref(), "Search query is required")?;

    let tracks = app_state.storage.search_tracks(q).await?;
    Ok(Json(tracks))
}

/// GET /api/tracks/:id
pub async fn get_track(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<TrackId>, PathRejection>,
) -> Result<Json<Track>> {
    let id = path_params(path)?;
    let track = app_state
        .storage
        .get_track(id)
        .await?
        .ok_or_else(|| ServerError::not_found("Track not found"))?;

    Ok(Json(track))
}
