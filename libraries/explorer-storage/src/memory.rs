//! Process-local storage backend
//!
//! All state lives in one `MemoryState` guarded by a single `RwLock`. Cross
//! entity operations such as appending a new track to a playlist take the
//! write lock once, so they cannot interleave with a concurrent delete of the
//! same playlist. The lock is never held across an `.await`.
//!
//! Identifiers come from per-kind counters starting at 1 and are never reused,
//! even after deletion.

use async_trait::async_trait;
use explorer_core::{
    error::{ExplorerError, Result},
    storage::Storage,
    types::*,
};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct MemoryState {
    users: BTreeMap<UserId, User>,
    playlists: BTreeMap<PlaylistId, Playlist>,
    tracks: BTreeMap<TrackId, Track>,
    next_user_id: UserId,
    next_playlist_id: PlaylistId,
    next_track_id: TrackId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            playlists: BTreeMap::new(),
            tracks: BTreeMap::new(),
            next_user_id: 1,
            next_playlist_id: 1,
            next_track_id: 1,
        }
    }
}

impl MemoryState {
    fn insert_track(&mut self, track: NewTrack) -> Track {
        let id = self.next_track_id;
        self.next_track_id += 1;

        let track = track.into_track(id);
        self.tracks.insert(id, track.clone());
        track
    }
}

/// In-memory storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| ExplorerError::storage("in-memory state lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| ExplorerError::storage("in-memory state lock poisoned"))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    // Users
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.write()?;

        if state.users.values().any(|u| u.username == user.username) {
            return Err(ExplorerError::conflict(format!(
                "username '{}' is already registered",
                user.username
            )));
        }

        let id = state.next_user_id;
        state.next_user_id += 1;

        let user = user.into_user(id);
        state.users.insert(id, user.clone());
        tracing::debug!(user_id = id, "Created user");
        Ok(user)
    }

    // Playlists
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.read()?.playlists.get(&id).cloned())
    }

    async fn get_playlists_by_user(&self, user_id: UserId) -> Result<Vec<Playlist>> {
        Ok(self
            .read()?
            .playlists
            .values()
            .filter(|playlist| playlist.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_playlist(&self, playlist: NewPlaylist) -> Result<Playlist> {
        let mut state = self.write()?;

        let id = state.next_playlist_id;
        state.next_playlist_id += 1;

        let playlist = playlist.into_playlist(id);
        state.playlists.insert(id, playlist.clone());
        tracing::debug!(playlist_id = id, "Created playlist");
        Ok(playlist)
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        update: PlaylistUpdate,
    ) -> Result<Option<Playlist>> {
        let mut state = self.write()?;

        let Some(playlist) = state.playlists.get_mut(&id) else {
            return Ok(None);
        };
        update.apply(playlist);
        tracing::debug!(playlist_id = id, "Updated playlist");
        Ok(Some(playlist.clone()))
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        let removed = self.write()?.playlists.remove(&id).is_some();
        if removed {
            tracing::debug!(playlist_id = id, "Deleted playlist");
        }
        Ok(removed)
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track: NewTrack,
    ) -> Result<bool> {
        let mut state = self.write()?;

        // Check first so a missing playlist does not consume a track id
        if !state.playlists.contains_key(&playlist_id) {
            return Ok(false);
        }

        let track = state.insert_track(track);
        let track_id = track.id;
        if let Some(playlist) = state.playlists.get_mut(&playlist_id) {
            playlist.tracks.push(track);
        }

        tracing::debug!(playlist_id, track_id, "Appended track to playlist");
        Ok(true)
    }

    async fn remove_track_at(
        &self,
        playlist_id: PlaylistId,
        index: usize,
    ) -> Result<TrackRemoval> {
        let mut state = self.write()?;

        let Some(playlist) = state.playlists.get_mut(&playlist_id) else {
            return Ok(TrackRemoval::PlaylistNotFound);
        };

        let len = playlist.tracks.len();
        if index >= len {
            return Ok(TrackRemoval::IndexOutOfRange { len });
        }

        let removed = playlist.tracks.remove(index);
        tracing::debug!(playlist_id, index, track_id = removed.id, "Removed track");
        Ok(TrackRemoval::Removed(removed))
    }

    // Tracks
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.read()?.tracks.get(&id).cloned())
    }

    async fn create_track(&self, track: NewTrack) -> Result<Track> {
        Ok(self.write()?.insert_track(track))
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let needle = query.to_lowercase();
        Ok(self
            .read()?
            .tracks
            .values()
            .filter(|track| track.matches(&needle))
            .cloned()
            .collect())
    }
}
