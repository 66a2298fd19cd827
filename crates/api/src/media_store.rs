//! Storage backend for uploaded media files.
//!
//! Handlers talk to a [`MediaStore`]; the server ships with
//! [`LocalMediaStore`], which writes under `MEDIA_ROOT` and is served
//! read-only at `/media/{key}` by the router.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use footlights_core::media::is_safe_storage_key;

use crate::error::AppError;

/// Error type for media storage failures.
#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    /// The key is absolute or contains traversal segments.
    #[error("Unsafe storage key '{0}'")]
    UnsafeKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MediaStoreError> for AppError {
    fn from(err: MediaStoreError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Object storage keyed by relative path.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), MediaStoreError>;

    /// Remove the object at `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> Result<(), MediaStoreError>;
}

/// [`MediaStore`] on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, MediaStoreError> {
        if !is_safe_storage_key(key) {
            return Err(MediaStoreError::UnsafeKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), MediaStoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write beside the target then rename, so readers never see a partial file.
        let partial = path.with_extension("part");
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, &path).await?;

        tracing::debug!(key, size = bytes.len(), "Media object stored");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), MediaStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(key, "Media object already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_then_delete_roundtrips_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        store.put("2025/03/abc-poster.png", b"png-bytes").await.unwrap();
        let on_disk = dir.path().join("2025/03/abc-poster.png");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"png-bytes");
        assert!(!dir.path().join("2025/03/abc-poster.part").exists());

        store.delete("2025/03/abc-poster.png").await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn deleting_missing_object_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());
        assert!(store.delete("2025/03/missing.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn traversal_keys_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());
        assert_matches!(
            store.put("../escape.txt", b"x").await,
            Err(MediaStoreError::UnsafeKey(_))
        );
        assert_matches!(
            store.delete("/etc/passwd").await,
            Err(MediaStoreError::UnsafeKey(_))
        );
    }
}
