//! Group repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Group;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// All groups ordered by name.
    async fn list(&self) -> Result<Vec<Group>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError>;
    /// Fails with `GroupNameAlreadyExists` / `RegistrationCodeAlreadyExists`.
    async fn create(&self, group: &Group) -> Result<Group, DomainError>;
}
