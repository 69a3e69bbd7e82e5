//! Storage contract shared by every backend
//!
//! Two implementations exist: a process-local in-memory store and a
//! document-database store. Callers must not be able to tell them apart.
//!
//! Outcome shapes:
//! - lookups return `Ok(None)` when the entity does not exist
//! - mutations targeting a missing parent return `Ok(false)`
//! - backend failures (network, timeout) are returned as `Err`

use crate::error::Result;
use crate::types::{
    NewPlaylist, NewTrack, NewUser, Playlist, PlaylistId, PlaylistUpdate, Track, TrackId,
    TrackRemoval, User, UserId,
};
use async_trait::async_trait;

/// Storage contract over users, playlists and tracks
#[async_trait]
pub trait Storage: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Find user by exact username
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Register a user
    ///
    /// Fails with `Conflict` when the username is already taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get playlist by ID, tracks included
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Get all playlists owned by a user
    async fn get_playlists_by_user(&self, user_id: UserId) -> Result<Vec<Playlist>>;

    /// Create a playlist. The returned playlist always has no tracks.
    async fn create_playlist(&self, playlist: NewPlaylist) -> Result<Playlist>;

    /// Merge `update` over an existing playlist
    async fn update_playlist(
        &self,
        id: PlaylistId,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>>;

    /// Delete playlist. Returns whether a playlist was removed.
    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool>;

    /// Create a new track from `track` and append it to the playlist
    ///
    /// Returns `false` if the playlist does not exist.
    async fn add_track_to_playlist(&self, playlist_id: PlaylistId, track: NewTrack)
        -> Result<bool>;

    /// Remove the track at zero-based `index`
    async fn remove_track_at(&self, playlist_id: PlaylistId, index: usize)
        -> Result<TrackRemoval>;

    /// Remove the track at zero-based `index`
    ///
    /// Returns `false` both when the playlist is missing and when the index
    /// is out of range. Use `remove_track_at` to tell the two apart.
    async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        index: usize,
    ) -> Result<bool> {
        Ok(self.remove_track_at(playlist_id, index).await?.is_removed())
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get track by ID
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Create a standalone track
    async fn create_track(&self, track: NewTrack) -> Result<Track>;

    /// Case-insensitive substring search over name, artist and album
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;
}
