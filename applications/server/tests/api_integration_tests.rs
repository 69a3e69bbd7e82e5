/// API integration tests
/// Tests complete HTTP request/response cycles against the in-memory backend
mod common;

use axum::http::StatusCode;
use common::TestApp;
use explorer_core::{NewPlaylist, Storage};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

// =============================================================================
// Playlists
// =============================================================================

#[tokio::test]
async fn test_road_trip_over_http() {
    let app = TestApp::offline();

    let (status, playlist) = app
        .post("/api/playlists", json!({ "name": "Road Trip" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(playlist["id"], 1);
    assert_eq!(playlist["name"], "Road Trip");
    assert_eq!(playlist["userId"], 1);
    assert_eq!(playlist["tracks"], json!([]));
    assert!(playlist.get("description").is_none());

    let (status, body) = app
        .post(
            "/api/playlists/1/tracks",
            json!({ "name": "Song A", "artist": "Artist X" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Track added to playlist");

    let (status, playlist) = app.get("/api/playlists/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(playlist["tracks"][0]["id"], 1);
    assert_eq!(playlist["tracks"][0]["name"], "Song A");

    let (status, _) = app.delete("/api/playlists/1/tracks/0").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.delete("/api/playlists/1/tracks/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("index 0"));

    let (_, playlist) = app.get("/api/playlists/1").await;
    assert_eq!(playlist["tracks"], json!([]));
}

#[tokio::test]
async fn test_create_ignores_supplied_tracks() {
    let app = TestApp::offline();

    let (status, playlist) = app
        .post(
            "/api/playlists",
            json!({
                "name": "Prefilled",
                "description": "Summer",
                "tracks": [{ "name": "Song A", "artist": "Artist X" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(playlist["description"], "Summer");
    assert_eq!(playlist["tracks"], json!([]));
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = TestApp::offline();

    let (status, body) = app.post("/api/playlists", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("name"));

    let (status, _) = app.post("/api/playlists", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::offline();
    app.post("/api/playlists", json!({ "name": "Valid" })).await;

    let (status, body) = app
        .post("/api/playlists/1/tracks", json!({ "name": 42 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_returns_default_user_playlists() {
    let app = TestApp::offline();
    app.post("/api/playlists", json!({ "name": "Mine" })).await;
    app.storage
        .create_playlist(NewPlaylist::new("Someone else's", 2))
        .await
        .unwrap();

    let (status, playlists) = app.get("/api/playlists").await;
    assert_eq!(status, StatusCode::OK);
    let playlists = playlists.as_array().unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0]["name"], "Mine");
}

#[tokio::test]
async fn test_update_playlist() {
    let app = TestApp::offline();
    app.post(
        "/api/playlists",
        json!({ "name": "Before", "description": "Keep" }),
    )
    .await;

    let (status, playlist) = app
        .put("/api/playlists/1", json!({ "name": "After" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(playlist["name"], "After");
    assert_eq!(playlist["description"], "Keep");

    let (status, _) = app.put("/api/playlists/1", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.put("/api/playlists/999", json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Playlist not found");
}

#[tokio::test]
async fn test_delete_playlist_twice() {
    let app = TestApp::offline();
    app.post("/api/playlists", json!({ "name": "Temporary" })).await;

    let (status, body) = app.delete("/api/playlists/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.delete("/api/playlists/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_playlist_routes_are_not_found() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/playlists/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Playlist not found");

    let (status, _) = app
        .post(
            "/api/playlists/999/tracks",
            json!({ "name": "Song A", "artist": "Artist X" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete("/api/playlists/999/tracks/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Playlist not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/playlists/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = app.delete("/api/playlists/1/tracks/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_track_index_is_not_found() {
    let app = TestApp::offline();

    app.post("/api/playlists", json!({ "name": "Road Trip" }))
        .await;
    app.post(
        "/api/playlists/1/tracks",
        json!({ "name": "Song A", "artist": "Artist X" }),
    )
    .await;

    let (status, body) = app.delete("/api/playlists/1/tracks/-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No track at index -1, playlist has 1 tracks");

    let (status, body) = app.delete("/api/playlists/999/tracks/-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Playlist not found");

    let (_, playlist) = app.get("/api/playlists/1").await;
    assert_eq!(playlist["tracks"][0]["name"], "Song A");
}

#[tokio::test]
async fn test_huge_track_index_is_not_found() {
    let app = TestApp::offline();

    app.post("/api/playlists", json!({ "name": "Road Trip" }))
        .await;

    let (status, body) = app
        .delete(&format!("/api/playlists/1/tracks/{}", i64::MAX))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("playlist has 0 tracks"));
}

#[tokio::test]
async fn test_add_track_requires_name_and_artist() {
    let app = TestApp::offline();
    app.post("/api/playlists", json!({ "name": "Valid" })).await;

    let (status, body) = app
        .post(
            "/api/playlists/1/tracks",
            json!({ "name": "Song A", "artist": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("artist"));
}

// =============================================================================
// Stored tracks
// =============================================================================

#[tokio::test]
async fn test_search_and_get_stored_tracks() {
    let app = TestApp::offline();
    app.post("/api/playlists", json!({ "name": "Mix" })).await;
    for (name, artist) in [("Song A", "Artist X"), ("Ballad", "Artist Y")] {
        app.post(
            "/api/playlists/1/tracks",
            json!({ "name": name, "artist": artist, "previewUrl": "" }),
        )
        .await;
    }

    let (status, tracks) = app.get("/api/tracks/search?q=SONG").await;
    assert_eq!(status, StatusCode::OK);
    let tracks = tracks.as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["name"], "Song A");
    // Empty optional strings are not stored
    assert!(tracks[0].get("previewUrl").is_none());

    let id = tracks[0]["id"].as_i64().unwrap();
    let (status, track) = app.get(&format!("/api/tracks/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(track["artist"], "Artist X");

    let (status, _) = app.get("/api/tracks/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_track_search_requires_query() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/tracks/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query is required");
}

// =============================================================================
// Last.fm and Deezer
// =============================================================================

#[tokio::test]
async fn test_top_tracks_passthrough() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("method", "geo.gettoptracks"))
        .and(query_param("country", "france"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "track": [{ "name": "Chanson", "artist": { "name": "Artiste" } }] }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = TestApp::new(&upstream.uri());
    let (status, tracks) = app
        .get("/api/charts/top-tracks?country=france&limit=5")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracks[0]["artist"]["name"], "Artiste");
}

#[tokio::test]
async fn test_top_artists_default_limit() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("method", "chart.gettopartists"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": { "artist": [] }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = TestApp::new(&upstream.uri());
    let (status, artists) = app.get("/api/charts/top-artists").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(artists, json!([]));
}

#[tokio::test]
async fn test_lastfm_search_requires_query() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/search/tracks?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query is required");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let app = TestApp::new(&upstream.uri());
    let (status, body) = app.get("/api/search/tracks?q=hello").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Failed to reach music service");
}

#[tokio::test]
async fn test_deezer_preview() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Artist X Song A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 42,
                "preview": "https://cdn.example/preview.mp3",
                "album": { "cover_medium": "m.jpg", "cover_small": "s.jpg" }
            }]
        })))
        .mount(&upstream)
        .await;

    let app = TestApp::new(&upstream.uri());
    let (status, preview) = app
        .get("/api/deezer/search?artist=Artist%20X&track=Song%20A")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["id"], 42);
    assert_eq!(preview["album"]["cover_small"], "s.jpg");
}

#[tokio::test]
async fn test_deezer_preview_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&upstream)
        .await;

    let app = TestApp::new(&upstream.uri());
    let (status, body) = app.get("/api/deezer/search?artist=A&track=B").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No preview found");
}

#[tokio::test]
async fn test_deezer_requires_artist_and_track() {
    let app = TestApp::offline();

    let (status, body) = app.get("/api/deezer/search?artist=A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Artist and track are required");
}
