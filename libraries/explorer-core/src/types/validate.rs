//! Input validation for insertable variants
//!
//! Backends trust their input; the request layer calls these before handing
//! values to storage.

use super::{NewPlaylist, NewTrack, NewUser, PlaylistUpdate};
use crate::error::{ExplorerError, Result};

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExplorerError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

pub fn new_user(user: &NewUser) -> Result<()> {
    require(&user.username, "username")?;
    require(&user.password, "password")
}

pub fn new_track(track: &NewTrack) -> Result<()> {
    require(&track.name, "name")?;
    require(&track.artist, "artist")
}

pub fn new_playlist(playlist: &NewPlaylist) -> Result<()> {
    require(&playlist.name, "name")?;
    playlist.tracks.iter().try_for_each(new_track)
}

pub fn playlist_update(update: &PlaylistUpdate) -> Result<()> {
    match &update.name {
        Some(name) => require(name, "name"),
        None => Ok(()),
    }
}
