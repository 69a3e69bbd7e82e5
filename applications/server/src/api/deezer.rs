/// Deezer preview route
use super::{query_params, required};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use explorer_discovery::DeezerPreview;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
}

/// GET /api/deezer/search?artist=&track=
pub async fn search_preview(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<PreviewQuery>, QueryRejection>,
) -> Result<Json<DeezerPreview>> {
    let query = query_params(query)?;
    let message = "Artist and track are required";
    let artist = required(query.artist.as_deref(), message)?;
    let track = required(query.track.as_deref(), message)?;

    let preview = app_state
        .deezer
        .find_preview(artist, track)
        .await?
        .ok_or_else(|| ServerError::not_found("No preview found"))?;

    Ok(Json(preview))
}
