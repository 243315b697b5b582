// ============================================================================
// Scout Infrastructure - Filesystem Attachment Store
// File: crates/scout-infrastructure/src/storage/filesystem.rs
// ============================================================================
//! Spray chart images live as flat files in the uploads directory, which the
//! HTTP layer serves directly under `/uploads`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, warn};

use scout_core::error::DomainError;
use scout_core::repositories::AttachmentStore;

pub struct FilesystemAttachmentStore {
    base_path: PathBuf,
}

impl FilesystemAttachmentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Create the uploads directory if needed.
    pub async fn init(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            error!("Cannot create uploads directory {}: {}", self.base_path.display(), e);
            DomainError::StorageError(e.to_string())
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a stored name inside the uploads directory. Anything that is
    /// not a single plain path segment is refused.
    fn full_path(&self, name: &str) -> Result<PathBuf, DomainError> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.contains('\0');
        if !plain {
            warn!("Refusing attachment name {:?}", name);
            return Err(DomainError::StorageError(format!("invalid file name: {}", name)));
        }
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl AttachmentStore for FilesystemAttachmentStore {
    async fn save(&self, name: &str, data: &[u8]) -> Result<(), DomainError> {
        let full_path = self.full_path(name)?;
        debug!(file = %full_path.display(), size = data.len(), "attachment: write");

        fs::write(&full_path, data).await.map_err(|e| {
            error!("Failed to write {}: {}", full_path.display(), e);
            DomainError::StorageError(e.to_string())
        })
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        let full_path = self.full_path(name)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(file = %full_path.display(), "attachment: removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %full_path.display(), "attachment: already gone");
                Ok(())
            }
            Err(e) => {
                error!("Failed to remove {}: {}", full_path.display(), e);
                Err(DomainError::StorageError(e.to_string()))
            }
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        let full_path = self.full_path(name)?;
        fs::try_exists(&full_path)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_exists_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemAttachmentStore::new(dir.path().join("uploads"));
        store.init().await.unwrap();

        store.save("spray-chart-a.png", b"png").await.unwrap();
        assert!(store.exists("spray-chart-a.png").await.unwrap());
        assert_eq!(std::fs::read(dir.path().join("uploads/spray-chart-a.png")).unwrap(), b"png");

        store.remove("spray-chart-a.png").await.unwrap();
        assert!(!store.exists("spray-chart-a.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_removing_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemAttachmentStore::new(dir.path());
        store.remove("never-written.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_path_traversal_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemAttachmentStore::new(dir.path());
        for name in ["../escape.png", "a/b.png", "..", "", "a\\b.png"] {
            assert!(store.save(name, b"x").await.is_err(), "{name}");
        }
    }
}
