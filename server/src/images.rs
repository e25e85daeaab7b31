//! Directory-backed store for uploaded recipe images.
//!
//! Each upload lands under a generated filename and is served back by the
//! /uploads endpoints. Replaced images are not garbage-collected.

use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Maximum accepted upload size.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Request body ceiling for the upload route, leaving headroom for the
/// multipart framing around the file itself.
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Only image uploads are accepted")]
    NotAnImage,

    #[error("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)]
    TooLarge,

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// A successfully stored upload.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub file_name: String,
    /// Public path the client persists on the recipe record.
    pub url: String,
}

#[derive(Debug)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist one uploaded image. The declared MIME type must
    /// be `image/*` and the payload must fit the size ceiling; nothing is
    /// written otherwise. The directory is created on first write.
    pub async fn store(
        &self,
        data: &[u8],
        original_filename: &str,
        content_type: &str,
    ) -> Result<StoredImage, ImageError> {
        if !content_type.starts_with("image/") {
            return Err(ImageError::NotAnImage);
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(ImageError::TooLarge);
        }

        fs::create_dir_all(&self.dir).await?;

        let file_name = generate_file_name(original_filename);
        fs::write(self.dir.join(&file_name), data).await?;

        tracing::info!("Stored upload {} ({} bytes)", file_name, data.len());
        Ok(StoredImage {
            url: format!("/uploads/{}", file_name),
            file_name,
        })
    }
}

/// `recipe-<epoch-ms>-<random>` plus the original extension, when present.
fn generate_file_name(original: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("recipe-{}-{}.{}", timestamp, suffix, ext),
        None => format!("recipe-{}-{}", timestamp, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = generate_file_name("holiday photo.JPG");
        assert!(name.starts_with("recipe-"));
        assert!(name.ends_with(".JPG"));

        let bare = generate_file_name("noextension");
        assert!(bare.starts_with("recipe-"));
        assert!(!bare.contains('.'));
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("uploads"));

        let stored = store
            .store(b"fake image bytes", "dinner.png", "image/png")
            .await
            .unwrap();

        assert_eq!(stored.url, format!("/uploads/{}", stored.file_name));
        assert!(stored.file_name.ends_with(".png"));
        let on_disk = std::fs::read(dir.path().join("uploads").join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_store_rejects_non_image_mime() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("uploads"));

        let err = store
            .store(b"%PDF-1.4", "notes.pdf", "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::NotAnImage));

        // Nothing written, not even the directory
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("uploads"));

        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let err = store.store(&big, "huge.jpg", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, ImageError::TooLarge));
        assert!(!dir.path().join("uploads").exists());
    }
}
