//! Storage contract tests for the in-memory backend
//!
//! Also covers behavior specific to this backend: ids are never reused and
//! concurrent mutations of one playlist are serialized.


use explorer_core::{NewPlaylist, NewTrack, Storage, DEFAULT_USER_ID};
use explorer_storage::{Backend, BackendKind, MemoryStorage};
use std::collections::HashSet;
use std::sync::Arc;
use test_helpers::*;

#[tokio::test]
async fn test_road_trip_scenario() {
    check_road_trip_scenario(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_missing_entities() {
    check_missing_entities(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_create_ignores_supplied_tracks() {
    check_create_ignores_supplied_tracks(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_remove_preserves_order() {
    check_remove_preserves_order(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_out_of_range_removal() {
    check_out_of_range_removal(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_added_tracks_get_fresh_ids() {
    check_added_tracks_get_fresh_ids(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_delete_twice() {
    check_delete_twice(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_sequential_ids_are_distinct() {
    check_sequential_ids_are_distinct(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_update_merges_fields() {
    check_update_merges_fields(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_playlists_by_user() {
    check_playlists_by_user(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    check_search_is_case_insensitive(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_users() {
    check_users(&MemoryStorage::new()).await;
}

#[tokio::test]
async fn test_backend_enum_delegates() {
    let backend = Backend::memory();
    assert_eq!(backend.kind(), BackendKind::Memory);
    check_road_trip_scenario(&backend).await;
}

#[tokio::test]
async fn test_deleting_highest_id_does_not_free_it() {
    let storage = MemoryStorage::new();
    let first = create_test_playlist(&storage, "First").await;
    let second = create_test_playlist(&storage, "Second").await;
    assert!(storage.delete_playlist(second).await.unwrap());

    let third = create_test_playlist(&storage, "Third").await;
    assert_ne!(third, second);
    assert!(third > second && second > first);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_lose_nothing() {
    let storage = Arc::new(MemoryStorage::new());
    let playlist_id = create_test_playlist(storage.as_ref(), "Party").await;

    let tasks: Vec<_> = (0..50)
        .map(|n| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .add_track_to_playlist(playlist_id, NewTrack::new(format!("Song {n}"), "DJ"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap());
    }

    let playlist = storage.get_playlist(playlist_id).await.unwrap().unwrap();
    assert_eq!(playlist.tracks.len(), 50);

    let names: HashSet<_> = playlist.tracks.iter().map(|t| t.name.clone()).collect();
    assert_eq!(names.len(), 50);
    let ids: HashSet<_> = playlist.tracks.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_and_delete() {
    let storage = Arc::new(MemoryStorage::new());

    for round in 0..20 {
        let playlist_id = storage
            .create_playlist(NewPlaylist::new(format!("Round {round}"), DEFAULT_USER_ID))
            .await
            .unwrap()
            .id;

        let adder = {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage
                    .add_track_to_playlist(playlist_id, NewTrack::new("Song", "Artist"))
                    .await
                    .unwrap()
            })
        };
        let deleter = {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.delete_playlist(playlist_id).await.unwrap() })
        };

        adder.await.unwrap();
        assert!(deleter.await.unwrap());

        // Whichever ran first, the playlist is gone and nothing references it
        assert!(storage.get_playlist(playlist_id).await.unwrap().is_none());
        assert!(!storage
            .add_track_to_playlist(playlist_id, NewTrack::new("Late", "Artist"))
            .await
            .unwrap());
    }
}
