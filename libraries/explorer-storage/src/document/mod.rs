//! MongoDB storage backend
//!
//! Three collections (`users`, `playlists`, `tracks`) hold one document per
//! entity. Every document carries the integer `id` exposed through the
//! storage contract next to the store-generated `_id`, which is never read.
//!
//! Identifiers are assigned as `max(id) + 1`. This is not an atomic counter:
//! two processes creating concurrently may pick the same id, and deleting the
//! entity with the highest id makes that id available again.
//!
//! Each round trip is bounded by `StorageSettings::operation_timeout`. A
//! timeout or a network failure surfaces as `BackendUnavailable`; nothing is
//! retried.

mod playlists;
mod tracks;
mod users;

use crate::error::{Result, StorageError};
use crate::settings::{StorageSettings, DEFAULT_DATABASE_NAME};
use async_trait::async_trait;
use explorer_core::{storage::Storage, types::*};
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, FindOneOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::future::Future;
use std::time::Duration;

const USERS: &str = "users";
const PLAYLISTS: &str = "playlists";
const TRACKS: &str = "tracks";

const APP_NAME: &str = "music-explorer";

/// Database handle plus the per-operation bound, shared by the collection
/// slices
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    db: Database,
    timeout: Duration,
}

impl Connection {
    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn playlists(&self) -> Collection<Playlist> {
        self.db.collection(PLAYLISTS)
    }

    fn tracks(&self) -> Collection<Track> {
        self.db.collection(TRACKS)
    }

    /// Run one round trip, failing with `StorageError::Timeout` when it does
    /// not complete in time
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StorageError::timeout(operation, self.timeout)),
        }
    }

    /// Next identifier for `collection`: highest stored `id` plus one
    async fn next_id(&self, collection: &str) -> Result<i64> {
        let options = FindOneOptions::builder()
            .sort(doc! { "id": -1 })
            .projection(doc! { "id": 1, "_id": 0 })
            .build();

        let highest = self
            .bounded(
                "find highest id",
                self.db
                    .collection::<Document>(collection)
                    .find_one(doc! {}, options),
            )
            .await?;

        Ok(stored_id(highest.as_ref())? + 1)
    }
}

/// Read the `id` of a stored document, 0 when there is none
///
/// Documents written by other tools may hold the id as any numeric type.
fn stored_id(document: Option<&Document>) -> Result<i64> {
    let Some(document) = document else {
        return Ok(0);
    };

    match document.get("id") {
        None => Ok(0),
        Some(Bson::Int32(id)) => Ok(i64::from(*id)),
        Some(Bson::Int64(id)) => Ok(*id),
        Some(Bson::Double(id)) if id.fract() == 0.0 => Ok(*id as i64),
        Some(other) => Err(StorageError::Conversion(format!(
            "non-integer id in stored document: {other}"
        ))),
    }
}

/// Storage backed by a MongoDB database
#[derive(Debug, Clone)]
pub struct DocumentStorage {
    conn: Connection,
}

impl DocumentStorage {
    /// Build a client from the configured connection string
    ///
    /// The driver connects lazily, so an unreachable server is only noticed by
    /// the first operation (or by `ping`).
    pub async fn new(settings: &StorageSettings) -> Result<Self> {
        let uri = settings.connection_string().ok_or_else(|| {
            StorageError::Config("no MongoDB connection string configured".to_string())
        })?;
        let timeout = settings.operation_timeout();
        if timeout.is_zero() {
            return Err(StorageError::Config(
                "operation timeout must be greater than zero".to_string(),
            ));
        }

        let mut options = match tokio::time::timeout(timeout, ClientOptions::parse(uri)).await {
            Ok(parsed) => parsed?,
            Err(_) => return Err(StorageError::timeout("parse connection string", timeout)),
        };
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let db = match settings.database_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
        };

        tracing::info!(database = db.name(), "Using MongoDB storage");

        Ok(Self {
            conn: Connection { db, timeout },
        })
    }

    /// Name of the database in use
    pub fn database_name(&self) -> &str {
        self.conn.db.name()
    }

    /// Round trip to the server
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .bounded("ping", self.conn.db.run_command(doc! { "ping": 1 }, None))
            .await?;
        Ok(())
    }

    /// Create the lookup indexes. Safe to call repeatedly.
    ///
    /// `id` indexes are not unique, since concurrent writers may legitimately
    /// produce duplicates. Usernames are unique.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let by_id = || IndexModel::builder().keys(doc! { "id": 1 }).build();

        self.conn
            .bounded("create users index", self.conn.users().create_index(by_id(), None))
            .await?;
        self.conn
            .bounded(
                "create playlists index",
                self.conn.playlists().create_index(by_id(), None),
            )
            .await?;
        self.conn
            .bounded("create tracks index", self.conn.tracks().create_index(by_id(), None))
            .await?;

        let by_owner = IndexModel::builder().keys(doc! { "userId": 1 }).build();
        self.conn
            .bounded(
                "create playlist owner index",
                self.conn.playlists().create_index(by_owner, None),
            )
            .await?;

        let by_username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.conn
            .bounded(
                "create username index",
                self.conn.users().create_index(by_username, None),
            )
            .await?;

        tracing::debug!(database = self.database_name(), "Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl Storage for DocumentStorage {
    // Users
    async fn get_user(&self, id: UserId) -> explorer_core::Result<Option<User>> {
        Ok(users::get_by_id(&self.conn, id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> explorer_core::Result<Option<User>> {
        Ok(users::get_by_username(&self.conn, username).await?)
    }

    async fn create_user(&self, user: NewUser) -> explorer_core::Result<User> {
        Ok(users::create(&self.conn, user).await?)
    }

    // Playlists
    async fn get_playlist(&self, id: PlaylistId) -> explorer_core::Result<Option<Playlist>> {
        Ok(playlists::get_by_id(&self.conn, id).await?)
    }

    async fn get_playlists_by_user(
        &self,
        user_id: UserId,
    ) -> explorer_core::Result<Vec<Playlist>> {
        Ok(playlists::get_by_user(&self.conn, user_id).await?)
    }

    async fn create_playlist(&self, playlist: NewPlaylist) -> explorer_core::Result<Playlist> {
        Ok(playlists::create(&self.conn, playlist).await?)
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        update: PlaylistUpdate,
    ) -> explorer_core::Result<Option<Playlist>> {
        Ok(playlists::update(&self.conn, id, update).await?)
    }

    async fn delete_playlist(&self, id: PlaylistId) -> explorer_core::Result<bool> {
        Ok(playlists::delete(&self.conn, id).await?)
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track: NewTrack,
    ) -> explorer_core::Result<bool> {
        Ok(playlists::add_track(&self.conn, playlist_id, track).await?)
    }

    async fn remove_track_at(
        &self,
        playlist_id: PlaylistId,
        index: usize,
    ) -> explorer_core::Result<TrackRemoval> {
        Ok(playlists::remove_track_at(&self.conn, playlist_id, index).await?)
    }

    // Tracks
    async fn get_track(&self, id: TrackId) -> explorer_core::Result<Option<Track>> {
        Ok(tracks::get_by_id(&self.conn, id).await?)
    }

    async fn create_track(&self, track: NewTrack) -> explorer_core::Result<Track> {
        Ok(tracks::create(&self.conn, track).await?)
    }

    async fn search_tracks(&self, query: &str) -> explorer_core::Result<Vec<Track>> {
        Ok(tracks::search(&self.conn, query).await?)
    }
}
