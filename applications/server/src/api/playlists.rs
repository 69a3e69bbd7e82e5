/// Playlists API routes
///
/// Every route acts on behalf of the default user until accounts are wired
/// into the HTTP layer.
use super::{json_body, path_params};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use explorer_core::{
    storage::Storage,
    types::{
        validate, NewPlaylist, NewTrack, Playlist, PlaylistId, PlaylistUpdate, TrackRemoval,
        DEFAULT_USER_ID,
    },
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Vec<NewTrack>,
}

fn playlist_not_found() -> ServerError {
    ServerError::not_found("Playlist not found")
}

/// GET /api/playlists
/// Get all playlists of the default user
pub async fn list_playlists(State(app_state): State<AppState>) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state
        .storage
        .get_playlists_by_user(DEFAULT_USER_ID)
        .await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
/// Create a new, empty playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let req = json_body(payload)?;
    let new_playlist = NewPlaylist {
        name: req.name,
        description: req.description,
        user_id: DEFAULT_USER_ID,
        tracks: req.tracks,
    };
    validate::new_playlist(&new_playlist)?;

    let playlist = app_state.storage.create_playlist(new_playlist).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id
/// Get playlist details with tracks
pub async fn get_playlist(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<PlaylistId>, PathRejection>,
) -> Result<Json<Playlist>> {
    let id = path_params(path)?;
    let playlist = app_state
        .storage
        .get_playlist(id)
        .await?
        .ok_or_else(playlist_not_found)?;

    Ok(Json(playlist))
}

/// PUT /api/playlists/:id
/// Update playlist name and/or description
pub async fn update_playlist(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<PlaylistId>, PathRejection>,
    payload: std::result::Result<Json<PlaylistUpdate>, JsonRejection>,
) -> Result<Json<Playlist>> {
    let id = path_params(path)?;
    let update = json_body(payload)?;
    validate::playlist_update(&update)?;

    let playlist = app_state
        .storage
        .update_playlist(id, update)
        .await?
        .ok_or_else(playlist_not_found)?;

    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
/// Delete a playlist
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<PlaylistId>, PathRejection>,
) -> Result<StatusCode> {
    let id = path_params(path)?;

    if app_state.storage.delete_playlist(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(playlist_not_found())
    }
}

/// POST /api/playlists/:id/tracks
/// Append a new track to a playlist
pub async fn add_track_to_playlist(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<PlaylistId>, PathRejection>,
    payload: std::result::Result<Json<NewTrack>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let id = path_params(path)?;
    let track = json_body(payload)?;
    validate::new_track(&track)?;

    if !app_state.storage.add_track_to_playlist(id, track).await? {
        return Err(playlist_not_found());
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Track added to playlist" })),
    ))
}

/// DELETE /api/playlists/:id/tracks/:index
/// Remove the track at a zero-based position
///
/// Negative indexes are accepted and answered like any other index outside
/// the playlist.
pub async fn remove_track_from_playlist(
    State(app_state): State<AppState>,
    path: std::result::Result<Path<(PlaylistId, i64)>, PathRejection>,
) -> Result<StatusCode> {
    let (id, index) = path_params(path)?;

    let removal = match usize::try_from(index) {
        Ok(position) => app_state.storage.remove_track_at(id, position).await?,
        Err(_) => match app_state.storage.get_playlist(id).await? {
            None => TrackRemoval::PlaylistNotFound,
            Some(playlist) => TrackRemoval::IndexOutOfRange {
                len: playlist.tracks.len(),
            },
        },
    };

    match removal {
        TrackRemoval::Removed(_) => Ok(StatusCode::NO_CONTENT),
        TrackRemoval::PlaylistNotFound => Err(playlist_not_found()),
        TrackRemoval::IndexOutOfRange { len } => Err(ServerError::not_found(format!(
            "No track at index {index}, playlist has {len} tracks"
        ))),
    }
}
