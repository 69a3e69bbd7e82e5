//! Music Explorer Core
//!
//! Entity model, storage contract and error handling shared by the storage
//! backends and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Track`, `Playlist` and their insertable variants
//! - **Storage Contract**: the `Storage` trait every backend implements
//! - **Error Handling**: unified `ExplorerError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use explorer_core::types::{NewPlaylist, NewTrack, DEFAULT_USER_ID};
//!
//! let playlist = NewPlaylist::new("Road Trip", DEFAULT_USER_ID).into_playlist(1);
//! assert!(playlist.tracks.is_empty());
//!
//! let track = NewTrack::new("Song A", "Artist X").into_track(1);
//! assert!(track.matches("song"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ExplorerError, Result};
pub use storage::Storage;

pub use types::{
    NewPlaylist, NewTrack, NewUser, Playlist, PlaylistId, PlaylistUpdate, Track, TrackId,
    TrackRemoval, User, UserId, DEFAULT_USER_ID,
};
