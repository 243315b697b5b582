//! Attachment file storage trait (port)

use async_trait::async_trait;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Write a new file. `name` is a bare file name, never a path.
    async fn save(&self, name: &str, data: &[u8]) -> Result<(), DomainError>;
    /// Remove a file; a file that is already gone is not an error.
    async fn remove(&self, name: &str) -> Result<(), DomainError>;
    async fn exists(&self, name: &str) -> Result<bool, DomainError>;
}
