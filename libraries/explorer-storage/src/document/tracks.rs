use super::{Connection, TRACKS};
use crate::error::Result;
use explorer_core::types::{NewTrack, Track, TrackId};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};

/// Fields matched by `search`
const SEARCH_FIELDS: [&str; 3] = ["name", "artist", "album"];

/// Get track by ID
pub(crate) async fn get_by_id(conn: &Connection, id: TrackId) -> Result<Option<Track>> {
    conn.bounded("find track", conn.tracks().find_one(doc! { "id": id }, None))
        .await
}

/// Insert a standalone track document
pub(crate) async fn create(conn: &Connection, track: NewTrack) -> Result<Track> {
    let id = conn.next_id(TRACKS).await?;
    let track = track.into_track(id);

    conn.bounded("insert track", conn.tracks().insert_one(&track, None))
        .await?;

    tracing::debug!(track_id = id, "Created track");
    Ok(track)
}

/// Remove a track document. Used to clean up after a failed append.
pub(crate) async fn delete(conn: &Connection, id: TrackId) -> Result<bool> {
    let result = conn
        .bounded("delete track", conn.tracks().delete_one(doc! { "id": id }, None))
        .await?;
    Ok(result.deleted_count > 0)
}

/// Case-insensitive substring search over name, artist and album
pub(crate) async fn search(conn: &Connection, query: &str) -> Result<Vec<Track>> {
    let filter = search_filter(query);

    conn.bounded("search tracks", async {
        let cursor = conn.tracks().find(filter, None).await?;
        cursor.try_collect::<Vec<Track>>().await
    })
    .await
}

/// `$or` of one case-insensitive `$regex` per searchable field
///
/// The query is escaped so it only ever matches literally. Documents without
/// an album never match on that field.
pub(crate) fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query);

    let clauses: Vec<Document> = SEARCH_FIELDS
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
            clause
        })
        .collect();

    doc! { "$or": clauses }
}
