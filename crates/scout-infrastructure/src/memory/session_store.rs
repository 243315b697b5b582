//! In-memory session store

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use scout_core::domain::Session;
use scout_core::error::DomainError;
use scout_core::repositories::SessionRepository;

use super::MemoryStore;

pub struct MemorySessionStore {
    store: Arc<MemoryStore>,
}

impl MemorySessionStore {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        self.store
            .sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.store.sessions.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.store.sessions.write().await.remove(id);
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let mut sessions = self.store.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != *user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut sessions = self.store.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_purge_and_user_removal() {
        let store = MemorySessionStore::new(MemoryStore::new());
        let user = Uuid::new_v4();
        let live = Session::new("live".into(), user, "e".into(), Uuid::new_v4(), "g".into(), 60);
        let stale = Session::new("stale".into(), Uuid::new_v4(), "e".into(), Uuid::new_v4(), "g".into(), -1);
        store.create(&live).await.unwrap();
        store.create(&stale).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.find("stale").await.unwrap().is_none());
        assert_eq!(store.delete_for_user(&user).await.unwrap(), 1);
        assert!(store.find("live").await.unwrap().is_none());
        store.delete("live").await.unwrap();
    }
}
