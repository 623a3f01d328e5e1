use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by inventory operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InventoryError {
    /// A required input was missing or empty.
    #[error("{message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },
    /// No item with the requested id exists.
    #[error("Item not found")]
    ItemNotFound {
        /// Requested item id.
        id: String,
    },
    /// The item exists but has no photo bound to it.
    #[error("Photo not found")]
    PhotoNotBound {
        /// Requested item id.
        id: String,
    },
    /// The item's bound photo file is absent from the cache directory.
    #[error("Photo file missing")]
    PhotoFileMissing {
        /// Filename the record references.
        filename: String,
    },
    /// The inventory document could not be written back.
    #[error("failed to write inventory document `{path}`: {source}")]
    DocumentWrite {
        /// Path of the persisted document.
        path: PathBuf,
        /// Underlying io failure.
        #[source]
        source: std::io::Error,
    },
    /// A photo file could not be written or removed.
    #[error("photo storage failed for `{filename}`: {source}")]
    PhotoIo {
        /// Filename involved in the failed operation.
        filename: String,
        /// Underlying io failure.
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Creates a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given item id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }
}
