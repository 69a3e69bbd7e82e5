//! Backend selection
//!
//! The backend is chosen once at startup from `StorageSettings` and shared by
//! every request handler. There is no hot swap.

use crate::document::DocumentStorage;
use crate::error::Result;
use crate::memory::MemoryStorage;
use crate::settings::{BackendKind, StorageSettings};
use async_trait::async_trait;
use explorer_core::{storage::Storage, types::*};

/// One of the two interchangeable storage backends
#[derive(Debug)]
pub enum Backend {
    Memory(MemoryStorage),
    Document(DocumentStorage),
}

impl Backend {
    /// Build the backend selected by `settings`
    ///
    /// With a MongoDB connection string the document store is used and its
    /// indexes are created, which requires the server to be reachable.
    /// Otherwise an empty in-memory store is returned.
    pub async fn connect(settings: &StorageSettings) -> Result<Self> {
        match settings.backend_kind() {
            BackendKind::Document => {
                let storage = DocumentStorage::new(settings).await?;
                storage.ensure_indexes().await?;
                tracing::info!(
                    backend = %BackendKind::Document,
                    database = storage.database_name(),
                    "Storage backend ready"
                );
                Ok(Self::Document(storage))
            }
            BackendKind::Memory => {
                tracing::warn!(
                    "MONGODB_URI not set, using in-memory storage. Data is lost on restart \
                     and not shared between processes"
                );
                Ok(Self::memory())
            }
        }
    }

    /// Fresh, empty in-memory backend
    pub fn memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Memory(_) => BackendKind::Memory,
            Self::Document(_) => BackendKind::Document,
        }
    }

    /// Check that the backend can serve requests
    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Document(storage) => storage.ping().await,
        }
    }
}

macro_rules! delegate {
    ($self:ident, $storage:ident => $call:expr) => {
        match $self {
            Backend::Memory($storage) => $call,
            Backend::Document($storage) => $call,
        }
    };
}

#[async_trait]
impl Storage for Backend {
    // Users
    async fn get_user(&self, id: UserId) -> explorer_core::Result<Option<User>> {
        delegate!(self, s => s.get_user(id).await)
    }

    async fn get_user_by_username(&self, username: &str) -> explorer_core::Result<Option<User>> {
        delegate!(self, s => s.get_user_by_username(username).await)
    }

    async fn create_user(&self, user: NewUser) -> explorer_core::Result<User> {
        delegate!(self, s => s.create_user(user).await)
    }

    // Playlists
    async fn get_playlist(&self, id: PlaylistId) -> explorer_core::Result<Option<Playlist>> {
        delegate!(self, s => s.get_playlist(id).await)
    }

    async fn get_playlists_by_user(
        &self,
        user_id: UserId,
    ) -> explorer_core::Result<Vec<Playlist>> {
        delegate!(self, s => s.get_playlists_by_user(user_id).await)
    }

    async fn create_playlist(&self, playlist: NewPlaylist) -> explorer_core::Result<Playlist> {
        delegate!(self, s => s.create_playlist(playlist).await)
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        update: PlaylistUpdate,
    ) -> explorer_core::Result<Option<Playlist>> {
        delegate!(self, s => s.update_playlist(id, update).await)
    }

    async fn delete_playlist(&self, id: PlaylistId) -> explorer_core::Result<bool> {
        delegate!(self, s => s.delete_playlist(id).await)
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track: NewTrack,
    ) -> explorer_core::Result<bool> {
        delegate!(self, s => s.add_track_to_playlist(playlist_id, track).await)
    }

    async fn remove_track_at(
        &self,
        playlist_id: PlaylistId,
        index: usize,
    ) -> explorer_core::Result<TrackRemoval> {
        delegate!(self, s => s.remove_track_at(playlist_id, index).await)
    }

    // Tracks
    async fn get_track(&self, id: TrackId) -> explorer_core::Result<Option<Track>> {
        delegate!(self, s => s.get_track(id).await)
    }

    async fn create_track(&self, track: NewTrack) -> explorer_core::Result<Track> {
        delegate!(self, s => s.create_track(track).await)
    }

    async fn search_tracks(&self, query: &str) -> explorer_core::Result<Vec<Track>> {
        delegate!(self, s => s.search_tracks(query).await)
    }
}
