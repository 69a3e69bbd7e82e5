//! Music Explorer Storage
//!
//! Backends implementing the `explorer_core::Storage` contract.
//!
//! # Backends
//!
//! - **Memory**: process-local maps behind one lock. Fast, lost on restart.
//! - **Document**: MongoDB collections. Survives restarts, shared between
//!   processes.
//!
//! `Backend::connect` picks one from `StorageSettings`: the document store when
//! a MongoDB connection string is configured, memory otherwise.
//!
//! # Example
//!
//! ```rust,no_run
//! use explorer_core::{NewPlaylist, Storage, DEFAULT_USER_ID};
//! use explorer_storage::{Backend, StorageSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = StorageSettings::mongodb("mongodb://localhost:27017/explorer");
//! let storage = Backend::connect(&settings).await?;
//!
//! let playlist = storage
//!     .create_playlist(NewPlaylist::new("Road Trip", DEFAULT_USER_ID))
//!     .await?;
//! assert!(playlist.tracks.is_empty());
//! # Ok(())
//! # }
//! ```

mod backend;
mod document;
mod error;
mod memory;
mod settings;

pub use backend::Backend;
pub use document::DocumentStorage;
pub use error::{Result, StorageError};
pub use memory::MemoryStorage;
pub use settings::{BackendKind, StorageSettings, DEFAULT_DATABASE_NAME};
