use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One catalogued inventory item as persisted and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier, assigned at creation and immutable thereafter.
    pub id: String,
    /// Item name; non-empty.
    pub name: String,
    /// Free-form description; defaults to empty.
    #[serde(default)]
    pub description: String,
    /// Stored filename of the bound photo, when one is bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_filename: Option<String>,
    /// Serving URL for the bound photo; present exactly when a photo is bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl InventoryItem {
    /// Creates an item with no photo bound.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            photo_filename: None,
            photo_url: None,
        }
    }

    /// Returns the serving URL for an item's photo.
    pub fn photo_url_for(id: &str) -> String {
        format!("/inventory/{id}/photo")
    }

    /// Binds a stored photo file, deriving the photo URL alongside it.
    pub fn bind_photo(&mut self, filename: impl Into<String>) {
        self.photo_url = Some(Self::photo_url_for(&self.id));
        self.photo_filename = Some(filename.into());
    }

    /// Clears the photo binding and returns the previously bound filename.
    pub fn unbind_photo(&mut self) -> Option<String> {
        self.photo_url = None;
        self.photo_filename.take()
    }
}

/// Partial update applied to an existing item.
///
/// An absent field leaves the current value untouched. A present but empty
/// `description` is applied; a present but empty `name` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    /// Replacement name, when provided and non-empty.
    pub name: Option<String>,
    /// Replacement description, when provided (empty string included).
    pub description: Option<String>,
}

/// In-memory payload of an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Original filename from the upload, when the client supplied one.
    pub original_name: Option<String>,
    /// Raw file content.
    pub content: Bytes,
}

impl PhotoUpload {
    /// Creates an upload payload from an optional original name and content.
    pub fn new(original_name: Option<String>, content: impl Into<Bytes>) -> Self {
        Self {
            original_name,
            content: content.into(),
        }
    }
}
