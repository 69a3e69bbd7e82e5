use super::{tracks, Connection, PLAYLISTS};
use crate::error::Result;
use explorer_core::types::{
    NewPlaylist, NewTrack, Playlist, PlaylistId, PlaylistUpdate, TrackRemoval, UserId,
};
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

/// Get playlist by ID, tracks included
pub(crate) async fn get_by_id(conn: &Connection, id: PlaylistId) -> Result<Option<Playlist>> {
    conn.bounded(
        "find playlist",
        conn.playlists().find_one(doc! { "id": id }, None),
    )
    .await
}

/// Get all playlists owned by a user, oldest first
pub(crate) async fn get_by_user(conn: &Connection, user_id: UserId) -> Result<Vec<Playlist>> {
    let options = FindOptions::builder().sort(doc! { "id": 1 }).build();

    conn.bounded("find playlists by user", async {
        let cursor = conn
            .playlists()
            .find(doc! { "userId": user_id }, options)
            .await?;
        cursor.try_collect::<Vec<Playlist>>().await
    })
    .await
}

/// Insert a playlist. Supplied tracks are ignored.
pub(crate) async fn create(conn: &Connection, playlist: NewPlaylist) -> Result<Playlist> {
    let id = conn.next_id(PLAYLISTS).await?;
    let playlist = playlist.into_playlist(id);

    conn.bounded(
        "insert playlist",
        conn.playlists().insert_one(&playlist, None),
    )
    .await?;

    tracing::debug!(playlist_id = id, "Created playlist");
    Ok(playlist)
}

/// Merge `update` over the stored playlist in one write
pub(crate) async fn update(
    conn: &Connection,
    id: PlaylistId,
    update: PlaylistUpdate,
) -> Result<Option<Playlist>> {
    if update.is_empty() {
        return get_by_id(conn, id).await;
    }

    let mut fields = Document::new();
    if let Some(name) = update.name {
        fields.insert("name", name);
    }
    if let Some(description) = update.description {
        fields.insert("description", description);
    }

    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let updated = conn
        .bounded(
            "update playlist",
            conn.playlists()
                .find_one_and_update(doc! { "id": id }, doc! { "$set": fields }, options),
        )
        .await?;

    if updated.is_some() {
        tracing::debug!(playlist_id = id, "Updated playlist");
    }
    Ok(updated)
}

/// Delete playlist. Returns whether a document was removed.
pub(crate) async fn delete(conn: &Connection, id: PlaylistId) -> Result<bool> {
    let result = conn
        .bounded(
            "delete playlist",
            conn.playlists().delete_one(doc! { "id": id }, None),
        )
        .await?;

    let deleted = result.deleted_count > 0;
    if deleted {
        tracing::debug!(playlist_id = id, "Deleted playlist");
    }
    Ok(deleted)
}

/// Create a track and append it with `$push`
///
/// The append is a single-document write, so concurrent appends to the same
/// playlist never overwrite each other. If the playlist disappears between the
/// existence check and the push, the fresh track document is removed again and
/// `false` is returned.
pub(crate) async fn add_track(
    conn: &Connection,
    playlist_id: PlaylistId,
    track: NewTrack,
) -> Result<bool> {
    let exists = conn
        .bounded(
            "check playlist",
            conn.playlists()
                .count_documents(doc! { "id": playlist_id }, None),
        )
        .await?
        > 0;
    if !exists {
        return Ok(false);
    }

    let track = tracks::create(conn, track).await?;
    let embedded = bson::to_bson(&track)?;

    let result = conn
        .bounded(
            "append track",
            conn.playlists().update_one(
                doc! { "id": playlist_id },
                doc! { "$push": { "tracks": embedded } },
                None,
            ),
        )
        .await?;

    if result.matched_count == 0 {
        tracing::warn!(
            playlist_id,
            track_id = track.id,
            "Playlist deleted while appending, discarding track"
        );
        tracks::delete(conn, track.id).await?;
        return Ok(false);
    }

    tracing::debug!(playlist_id, track_id = track.id, "Appended track to playlist");
    Ok(true)
}

/// Remove the track at `index` in one guarded write
///
/// The filter only matches when the playlist has an element at `index`, so
/// the bounds check and the removal cannot be separated by another writer.
/// Indexes no BSON array can reach skip the write.
pub(crate) async fn remove_track_at(
    conn: &Connection,
    playlist_id: PlaylistId,
    index: usize,
) -> Result<TrackRemoval> {
    if let Some(pipeline) = remove_pipeline(index) {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();

        let before = conn
            .bounded(
                "remove track",
                conn.playlists().find_one_and_update(
                    remove_filter(playlist_id, index),
                    pipeline,
                    options,
                ),
            )
            .await?;

        if let Some(removed) = before.and_then(|p| p.tracks.into_iter().nth(index)) {
            tracing::debug!(playlist_id, index, track_id = removed.id, "Removed track");
            return Ok(TrackRemoval::Removed(removed));
        }
    }

    // Nothing matched: tell a missing playlist from a short one
    Ok(match get_by_id(conn, playlist_id).await? {
        None => TrackRemoval::PlaylistNotFound,
        Some(playlist) => TrackRemoval::IndexOutOfRange {
            len: playlist.tracks.len(),
        },
    })
}

/// Matches the playlist only if it has an element at `index`
pub(crate) fn remove_filter(playlist_id: PlaylistId, index: usize) -> Document {
    let mut filter = doc! { "id": playlist_id };
    filter.insert(format!("tracks.{index}"), doc! { "$exists": true });
    filter
}

/// Update pipeline rebuilding `tracks` without the element at `index`
///
/// `None` when `index + 1` does not fit in an `i64` slice position.
pub(crate) fn remove_pipeline(index: usize) -> Option<Vec<Document>> {
    let position = i64::try_from(index).ok()?;
    let next = position.checked_add(1)?;

    let head = if index == 0 {
        Bson::Array(Vec::new())
    } else {
        Bson::Document(doc! { "$slice": ["$tracks", position] })
    };
    let tail = doc! {
        "$slice": ["$tracks", next, { "$size": "$tracks" }]
    };

    Some(vec![doc! {
        "$set": { "tracks": { "$concatArrays": [head, tail] } }
    }])
}
