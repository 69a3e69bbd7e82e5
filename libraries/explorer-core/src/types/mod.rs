mod ids;
mod playlist;
mod track;
mod user;

pub mod validate;

pub use ids::{PlaylistId, TrackId, UserId, DEFAULT_USER_ID};
pub use playlist::{NewPlaylist, Playlist, PlaylistUpdate, TrackRemoval};
pub use track::{NewTrack, Track};
pub use user::{NewUser, User};
