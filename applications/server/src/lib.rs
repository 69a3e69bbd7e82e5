//! Music Explorer Server Library
//!
//! HTTP API over the playlist storage plus passthrough routes for Last.fm
//! charts and Deezer previews.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

/// Build the complete `/api` router
pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(api::health::health))
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/tracks",
            post(api::playlists::add_track_to_playlist),
        )
        .route(
            "/playlists/:id/tracks/:index",
            delete(api::playlists::remove_track_from_playlist),
        )
        // Stored tracks
        .route("/tracks/search", get(api::tracks::search_tracks))
        .route("/tracks/:id", get(api::tracks::get_track))
        // Last.fm
        .route("/charts/top-tracks", get(api::charts::top_tracks))
        .route("/charts/top-artists", get(api::charts::top_artists))
        .route("/search/tracks", get(api::charts::search_tracks))
        // Deezer
        .route("/deezer/search", get(api::deezer::search_preview));

    Router::new()
        .nest("/api", routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
