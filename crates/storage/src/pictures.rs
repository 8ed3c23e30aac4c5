use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, StorageError};

/// Uploads larger than this are rejected before anything touches disk.
pub const MAX_PICTURE_BYTES: usize = 10 * 1024 * 1024;

/// Blob store for profile pictures: a flat directory of image files keyed by
/// generated filename. Filenames are fresh UUIDs, so concurrent stores never
/// collide and no locking is needed.
#[derive(Debug, Clone)]
pub struct PictureStore {
    dir: PathBuf,
}

impl PictureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validates and writes an uploaded image, returning the generated filename.
    /// The extension is taken from the original filename when it has one,
    /// otherwise derived from the mime subtype.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_file_name: Option<&str>,
        content_type: &str,
    ) -> Result<String> {
        if !content_type.starts_with("image/") {
            return Err(StorageError::validation(format!(
                "Profile picture must be an image, got `{content_type}`"
            )));
        }
        if bytes.len() > MAX_PICTURE_BYTES {
            return Err(StorageError::validation(format!(
                "Profile picture exceeds the {} byte limit",
                MAX_PICTURE_BYTES
            )));
        }

        let extension = original_file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| extension_from_mime(content_type).to_string());

        let filename = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(filename)
    }

    /// Reads a blob back. A missing file is `None`, never an error.
    pub async fn open(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal: a missing target is fine, any other I/O failure
    /// surfaces to the caller.
    pub async fn remove(&self, filename: &str) -> Result<()> {
        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Response content type for a stored filename, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn extension_from_mime(content_type: &str) -> &str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        _ => "bin",
    }
}
