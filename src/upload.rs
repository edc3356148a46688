//! Local image storage for school photos.
//!
//! The upload collaborator: accepts file bytes, stores them under the upload
//! directory with a generated name, and returns the public path reference that
//! gets attached to the record. The record model itself never sees file bytes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::error::{DirectoryError, Result};

/// Public URL prefix under which stored images are served
pub const PUBLIC_PREFIX: &str = "/uploads";

/// File store for uploaded school images
pub struct ImageStore {
    directory: PathBuf,
    max_bytes: u64,
    allowed_types: Vec<String>,
}

impl ImageStore {
    /// Create a store rooted at `directory`, creating it if missing.
    pub fn new(
        directory: impl Into<PathBuf>,
        max_file_size_mb: u64,
        allowed_types: Vec<String>,
    ) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;

        Ok(Self {
            directory,
            max_bytes: max_file_size_mb * 1024 * 1024,
            allowed_types,
        })
    }

    /// Directory files are written to (served under [`PUBLIC_PREFIX`]).
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Store one uploaded image and return its public path reference.
    ///
    /// Rejects empty payloads, payloads over the configured size cap, and
    /// content types outside the allow-list. The stored name is a fresh UUID
    /// so uploads never collide or overwrite each other.
    pub fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(DirectoryError::Upload("uploaded file is empty".to_string()));
        }

        if bytes.len() as u64 > self.max_bytes {
            return Err(DirectoryError::Upload(format!(
                "file of {} bytes exceeds the {} byte limit",
                bytes.len(),
                self.max_bytes
            )));
        }

        let extension = self.extension_for(content_type)?;
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let path = self.directory.join(&file_name);

        fs::write(&path, bytes)
            .map_err(|e| DirectoryError::Upload(format!("failed to store file: {e}")))?;
        info!(file = %file_name, size = bytes.len(), "stored school image");

        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Map an allowed content type to a file extension.
    fn extension_for(&self, content_type: &str) -> Result<&'static str> {
        let content_type = content_type.to_lowercase();
        if !self.allowed_types.iter().any(|t| t == &content_type) {
            return Err(DirectoryError::Upload(format!(
                "content type {content_type} is not allowed"
            )));
        }

        Ok(match content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        })
    }
}
