/// Playlist domain types
use super::ids::{PlaylistId, UserId};
use super::track::{NewTrack, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of embedded tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name (never empty)
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owner user ID
    pub user_id: UserId,

    /// Tracks in display order. Always present, possibly empty.
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new playlist
///
/// `tracks` is accepted for compatibility with clients that send an initial
/// track list, but creation always starts from an empty sequence. Tracks must
/// be added afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: UserId,
    #[serde(default)]
    pub tracks: Vec<NewTrack>,
}

impl NewPlaylist {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            name: name.into(),
            description: None,
            user_id,
            tracks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an identifier, producing the stored record
    ///
    /// Supplied tracks are dropped and an empty description becomes `None`.
    pub fn into_playlist(self, id: PlaylistId) -> Playlist {
        Playlist {
            id,
            name: self.name,
            description: self.description.filter(|d| !d.is_empty()),
            user_id: self.user_id,
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update merged over an existing playlist
///
/// Only the user-editable fields are exposed. Tracks change through the
/// dedicated add/remove operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PlaylistUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: Some(description.into()),
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Merge the supplied fields into `playlist`
    pub fn apply(&self, playlist: &mut Playlist) {
        if let Some(name) = &self.name {
            playlist.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            playlist.description = Some(description.clone());
        }
    }
}

/// Outcome of removing a track by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackRemoval {
    /// The track that was at the requested position
    Removed(Track),
    /// No playlist with the requested id
    PlaylistNotFound,
    /// The playlist exists but has no track at the requested position
    IndexOutOfRange { len: usize },
}

impl TrackRemoval {
    pub fn is_removed(&self) -> bool {
        matches!(self, TrackRemoval::Removed(_))
    }
}
