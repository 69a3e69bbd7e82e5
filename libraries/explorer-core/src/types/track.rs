/// Track domain types
use super::ids::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track as stored by a backend
///
/// Tracks are immutable once created. A playlist embeds its own copies, so
/// the same song added to two playlists yields two tracks with distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Display duration as reported by the metadata source (e.g. "3:45")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// 30 second preview clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,

    /// Artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Last.fm page of the track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfm_url: Option<String>,

    /// Deezer track reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deezer_track_id: Option<String>,

    /// When the track record was created
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// Case-insensitive substring match against name, artist and album
    ///
    /// `needle` must already be lowercased. A track without an album never
    /// matches on the album field.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self
                .album
                .as_deref()
                .is_some_and(|album| album.to_lowercase().contains(needle))
    }
}

/// Data for creating a new track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrack {
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub lastfm_url: Option<String>,
    #[serde(default)]
    pub deezer_track_id: Option<String>,
}

impl NewTrack {
    /// Create a track description with only the required fields
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Set the album title
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Attach an identifier, producing the stored record
    ///
    /// Empty optional strings are normalized to `None`.
    pub fn into_track(self, id: TrackId) -> Track {
        Track {
            id,
            name: self.name,
            artist: self.artist,
            album: non_empty(self.album),
            duration: non_empty(self.duration),
            preview_url: non_empty(self.preview_url),
            image_url: non_empty(self.image_url),
            lastfm_url: non_empty(self.lastfm_url),
            deezer_track_id: non_empty(self.deezer_track_id),
            created_at: Utc::now(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
