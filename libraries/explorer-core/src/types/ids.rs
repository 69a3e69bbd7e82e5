//! Identifier types for Music Explorer entities
//!
//! Identifiers are small integers assigned by the storage backend. The
//! document store keeps its own native keys next to them; those never leave
//! the backend.

/// User identifier
pub type UserId = i64;

/// Track identifier
pub type TrackId = i64;

/// Playlist identifier
pub type PlaylistId = i64;

/// Owner of every playlist created through the HTTP API (single implicit user)
pub const DEFAULT_USER_ID: UserId = 1;
