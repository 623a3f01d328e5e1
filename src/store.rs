//! The authoritative inventory collection and its persistence cycle.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::InventoryError,
    model::{InventoryItem, ItemPatch, PhotoUpload},
    photo::PhotoStore,
};

/// Basename of the persisted inventory document inside the cache directory.
pub const DOCUMENT_NAME: &str = "inventory.json";

/// Store for inventory items, persisted as a single JSON document.
///
/// Every operation runs a full load→mutate→save cycle against the document;
/// no collection state is cached between calls. Mutating operations are
/// serialized through an internal lock so concurrent writers cannot lose each
/// other's updates, and the document is replaced atomically so readers never
/// observe a partial write.
#[derive(Debug)]
pub struct InventoryStore {
    document_path: PathBuf,
    photos: PhotoStore,
    write_lock: Mutex<()>,
}

impl InventoryStore {
    /// Creates a store persisting into the given cache directory.
    ///
    /// The document and the photo files it references live side by side in
    /// that directory. A missing document is treated as an empty collection.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        Self {
            document_path: cache_dir.join(DOCUMENT_NAME),
            photos: PhotoStore::new(cache_dir),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the path of the persisted document.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Returns the photo store backing this inventory.
    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    /// Returns all items in insertion order.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        Ok(self.load().await)
    }

    /// Returns the item with the given id.
    pub async fn get(&self, id: &str) -> Result<InventoryItem, InventoryError> {
        let items = self.load().await;
        items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| InventoryError::not_found(id))
    }

    /// Creates a new item, optionally binding an uploaded photo.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        photo: Option<PhotoUpload>,
    ) -> Result<InventoryItem, InventoryError> {
        if name.is_empty() {
            return Err(InventoryError::validation("name is required"));
        }

        let id = Uuid::new_v4().to_string();
        let mut item = InventoryItem::new(id, name, description);
        if let Some(upload) = photo {
            let filename = self
                .photos
                .store(upload.original_name.as_deref(), &upload.content)
                .await?;
            item.bind_photo(filename);
        }

        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await;
        items.push(item.clone());
        self.save(&items).await?;

        tracing::info!(id = %item.id, name = %item.name, "created inventory item");
        Ok(item)
    }

    /// Applies a partial update to the named item.
    pub async fn update(&self, id: &str, patch: ItemPatch) -> Result<InventoryItem, InventoryError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await;
        let item = find_mut(&mut items, id)?;

        match patch.name {
            Some(name) if !name.is_empty() => item.name = name,
            _ => {}
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        let updated = item.clone();

        self.save(&items).await?;
        Ok(updated)
    }

    /// Removes the named item and its bound photo file, if any.
    ///
    /// Returns the removed item's id. An already-absent photo file does not
    /// fail the delete.
    pub async fn delete(&self, id: &str) -> Result<String, InventoryError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| InventoryError::not_found(id))?;
        let removed = items.remove(index);

        if let Some(filename) = &removed.photo_filename {
            self.photos.remove(filename).await?;
        }

        self.save(&items).await?;
        tracing::info!(id = %removed.id, "deleted inventory item");
        Ok(removed.id)
    }

    /// Replaces the item's bound photo, deleting the previously bound file.
    ///
    /// The new file is stored and the document saved before the old file is
    /// removed, so a failure along the way never leaves the document
    /// referencing a file that is already gone.
    pub async fn replace_photo(
        &self,
        id: &str,
        photo: Option<PhotoUpload>,
    ) -> Result<InventoryItem, InventoryError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await;
        let item = find_mut(&mut items, id)?;
        let upload = photo.ok_or_else(|| InventoryError::validation("No photo uploaded"))?;

        let filename = self
            .photos
            .store(upload.original_name.as_deref(), &upload.content)
            .await?;
        let previous = item.unbind_photo();
        item.bind_photo(filename);
        let updated = item.clone();

        self.save(&items).await?;
        if let Some(previous) = previous {
            self.photos.remove(&previous).await?;
        }
        Ok(updated)
    }

    /// Reads the bytes and content type of the item's bound photo.
    ///
    /// Distinguishes an unknown item, an item with no photo bound, and a
    /// bound file that is missing from disk.
    pub async fn read_photo(&self, id: &str) -> Result<(Bytes, mime::Mime), InventoryError> {
        let item = self.get(id).await?;
        let filename = item
            .photo_filename
            .as_deref()
            .ok_or_else(|| InventoryError::PhotoNotBound { id: id.to_owned() })?;
        let content = self.photos.read(filename).await?;
        Ok((content, PhotoStore::content_type(filename)))
    }

    /// Loads the full document, treating a missing or unreadable one as empty.
    ///
    /// Unreadable content masks whatever was previously persisted, so it is
    /// logged at error level before the empty collection is returned.
    async fn load(&self) -> Vec<InventoryItem> {
        let raw = match tokio::fs::read(&self.document_path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::error!(
                    path = %self.document_path.display(),
                    error = %err,
                    "inventory document is unreadable; treating collection as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::error!(
                    path = %self.document_path.display(),
                    error = %err,
                    "inventory document is corrupt; treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    /// Writes the full document back, replacing it atomically.
    async fn save(&self, items: &[InventoryItem]) -> Result<(), InventoryError> {
        let encoded = serde_json::to_vec_pretty(items).map_err(|err| {
            InventoryError::DocumentWrite {
                path: self.document_path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            }
        })?;

        if let Some(parent) = self.document_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| InventoryError::DocumentWrite {
                    path: self.document_path.clone(),
                    source,
                })?;
        }

        // Write-then-rename keeps lock-free readers away from torn documents.
        let staging = self.document_path.with_extension("json.tmp");
        tokio::fs::write(&staging, &encoded)
            .await
            .map_err(|source| InventoryError::DocumentWrite {
                path: self.document_path.clone(),
                source,
            })?;
        tokio::fs::rename(&staging, &self.document_path)
            .await
            .map_err(|source| InventoryError::DocumentWrite {
                path: self.document_path.clone(),
                source,
            })
    }
}

fn find_mut<'a>(
    items: &'a mut [InventoryItem],
    id: &str,
) -> Result<&'a mut InventoryItem, InventoryError> {
    items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| InventoryError::not_found(id))
}
