#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Inventory catalog service: a JSON-document record store with bound photo
//! assets and case-insensitive substring search, served over HTTP.

/// Command-line configuration surface.
pub mod config;
/// Error types exposed by this crate.
pub mod error;
/// HTTP router and handlers.
pub mod http;
/// Item record and request payload models.
pub mod model;
/// Photo asset storage.
pub mod photo;
/// Substring search over the collection.
pub mod search;
/// The persisted inventory collection.
pub mod store;

pub use config::ServerConfig;
pub use error::InventoryError;
pub use http::build_router;
pub use model::{InventoryItem, ItemPatch, PhotoUpload};
pub use photo::PhotoStore;
pub use search::{match_items, SearchOutcome};
pub use store::InventoryStore;
