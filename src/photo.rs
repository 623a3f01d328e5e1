//! Photo asset storage under the cache directory.

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use bytes::Bytes;
use uuid::Uuid;

use crate::error::InventoryError;

/// Disk-backed store for uploaded photo files.
///
/// Every stored photo receives a freshly generated, collision-resistant
/// filename, so concurrent uploads never target the same file and existing
/// files are never overwritten.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Creates a photo store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory photos are stored under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the uploaded content under a generated filename and returns it.
    ///
    /// The filename combines the current time with a random component and
    /// preserves the (sanitized) extension of the original name.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        content: &[u8],
    ) -> Result<String, InventoryError> {
        let filename = generate_filename(original_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| InventoryError::PhotoIo {
                filename: filename.clone(),
                source,
            })?;

        let path = self.root.join(&filename);
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| InventoryError::PhotoIo {
                filename: filename.clone(),
                source,
            })?;

        tracing::debug!(
            filename = %filename,
            size = content.len(),
            root = %self.root.display(),
            "stored photo"
        );
        Ok(filename)
    }

    /// Deletes the named file; an already-absent file is a no-op.
    pub async fn remove(&self, filename: &str) -> Result<(), InventoryError> {
        let path = self.resolve(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(filename = %filename, "removed photo");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(InventoryError::PhotoIo {
                filename: filename.to_owned(),
                source,
            }),
        }
    }

    /// Reads the named file back, distinguishing absence from other failures.
    pub async fn read(&self, filename: &str) -> Result<Bytes, InventoryError> {
        let path = self.resolve(filename)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(InventoryError::PhotoFileMissing {
                    filename: filename.to_owned(),
                })
            }
            Err(source) => Err(InventoryError::PhotoIo {
                filename: filename.to_owned(),
                source,
            }),
        }
    }

    /// Guesses the MIME type of a stored photo from its extension.
    pub fn content_type(filename: &str) -> mime::Mime {
        let ext = Path::new(filename)
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
            Some("png") => mime::IMAGE_PNG,
            Some("gif") => mime::IMAGE_GIF,
            Some("bmp") => mime::IMAGE_BMP,
            Some("svg") => mime::IMAGE_SVG,
            Some("webp") => "image/webp"
                .parse()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM),
            _ => mime::APPLICATION_OCTET_STREAM,
        }
    }

    /// Resolves a stored filename to a path, rejecting anything that is not a
    /// plain basename.
    fn resolve(&self, filename: &str) -> Result<PathBuf, InventoryError> {
        let is_basename = Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == filename);
        if filename.is_empty() || !is_basename {
            return Err(InventoryError::PhotoIo {
                filename: filename.to_owned(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "photo filename must be a plain basename",
                ),
            });
        }
        Ok(self.root.join(filename))
    }
}

fn generate_filename(original_name: Option<&str>) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix = Uuid::new_v4().simple();

    match original_name.and_then(safe_extension) {
        Some(ext) => format!("{millis}-{suffix}.{ext}"),
        None => format!("{millis}-{suffix}"),
    }
}

/// Extracts a filesystem-safe extension from an uploaded filename.
///
/// The extension is the only part of the original name that survives into
/// the stored filename; everything else is generated. Traversal components
/// are discarded via basename extraction, and anything but a short
/// alphanumeric extension yields `None`.
pub fn safe_extension(name: &str) -> Option<String> {
    let base = Path::new(name).file_name().and_then(|value| value.to_str())?;
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 16 {
        return None;
    }
    ext.chars()
        .all(|ch| ch.is_ascii_alphanumeric())
        .then(|| ext.to_owned())
}
