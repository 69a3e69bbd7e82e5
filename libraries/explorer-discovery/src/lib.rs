//! Music Explorer Discovery
//!
//! Thin clients for the third-party catalogues the explorer browses:
//!
//! - **Last.fm**: top charts (global or per country) and track search
//! - **Deezer**: 30 second previews and album artwork
//!
//! # Example
//!
//! ```rust,no_run
//! use explorer_discovery::{DeezerClient, DiscoverySettings, LastfmClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = DiscoverySettings::default();
//!
//! let lastfm = LastfmClient::from_settings(&settings)?;
//! let tracks = lastfm.top_tracks(Some("germany"), 20).await?;
//!
//! let deezer = DeezerClient::from_settings(&settings)?;
//! if let Some(preview) = deezer.find_preview("Daft Punk", "One More Time").await? {
//!     println!("{} tracks, preview at {}", tracks.len(), preview.preview);
//! }
//! # Ok(())
//! # }
//! ```

mod deezer;
mod error;
mod http;
mod lastfm;
mod settings;

pub use deezer::{DeezerAlbum, DeezerClient, DeezerPreview};
pub use error::{DiscoveryError, Result};
pub use lastfm::{LastfmClient, DEMO_API_KEY};
pub use settings::{DiscoverySettings, DEEZER_BASE_URL, LASTFM_BASE_URL};
