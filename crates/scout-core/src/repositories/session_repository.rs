//! Session store trait (port)

use async_trait::async_trait;
use crate::domain::Session;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), DomainError>;
    /// Stored session by id; stores may return expired entries, callers check.
    async fn find(&self, id: &str) -> Result<Option<Session>, DomainError>;
    /// Idempotent.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    /// Remove every session of a user, e.g. after deactivation.
    async fn delete_for_user(&self, user_id: &uuid::Uuid) -> Result<u64, DomainError>;
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
