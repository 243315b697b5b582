// ============================================================================
// Scout Infrastructure - Redis Session Store
// File: crates/scout-infrastructure/src/cache/redis_session_store.rs
// ============================================================================
//! Sessions are stored as JSON under `<prefix>session:<id>` with a TTL equal
//! to the session's remaining lifetime, so Redis expires them on its own.
//! A per-user set `<prefix>user-sessions:<user_id>` indexes them for bulk
//! removal.

use async_trait::async_trait;
use deadpool_redis::redis::{self, RedisError};
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use tracing::{debug, error};
use uuid::Uuid;

use scout_core::domain::Session;
use scout_core::error::DomainError;
use scout_core::repositories::SessionRepository;

pub fn create_redis_pool(url: &str, max_connections: usize) -> Result<Pool, DomainError> {
    let mut config = Config::from_url(url);
    config.pool = Some(PoolConfig::new(max_connections));
    config.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
        error!("Failed to create Redis pool: {}", e);
        DomainError::StorageError(e.to_string())
    })
}

pub struct RedisSessionStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(pool: Pool, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    fn session_key(&self, id: &str) -> String {
        format!("{}session:{}", self.key_prefix, id)
    }

    fn user_key(&self, user_id: &Uuid) -> String {
        format!("{}user-sessions:{}", self.key_prefix, user_id)
    }

    async fn connection(&self) -> Result<Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis pool error: {}", e);
            DomainError::StorageError(e.to_string())
        })
    }
}

fn redis_error(context: &str, e: RedisError) -> DomainError {
    error!("Redis error {}: {}", context, e);
    DomainError::StorageError(e.to_string())
}

#[async_trait]
impl SessionRepository for RedisSessionStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let payload = serde_json::to_string(session)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        let ttl = session.remaining_seconds().max(1);
        let user_key = self.user_key(&session.user_id);

        let mut conn = self.connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .cmd("SET").arg(self.session_key(&session.id)).arg(payload).arg("EX").arg(ttl).ignore()
            .cmd("SADD").arg(&user_key).arg(&session.id).ignore()
            .cmd("EXPIRE").arg(&user_key).arg(ttl).ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("creating session", e))?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Session>, DomainError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = redis::cmd("GET")
            .arg(self.session_key(id))
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("finding session", e))?;

        match payload {
            Some(json) => match serde_json::from_str(&json) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    error!("Discarding unreadable session payload: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("DEL")
            .arg(self.session_key(id))
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("deleting session", e))?;
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let user_key = self.user_key(user_id);
        let mut conn = self.connection().await?;
        let ids: Vec<String> = redis::cmd("SMEMBERS")
            .arg(&user_key)
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("listing user sessions", e))?;

        let mut keys: Vec<String> = ids.iter().map(|id| self.session_key(id)).collect();
        keys.push(user_key);
        let removed: u64 = redis::cmd("DEL")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("deleting user sessions", e))?;

        debug!("Removed {} Redis key(s) for user {}", removed, user_id);
        Ok(ids.len() as u64)
    }

    /// Redis expires session keys itself.
    async fn purge_expired(&self) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed() {
        let pool = create_redis_pool("redis://127.0.0.1:6379", 2).unwrap();
        let store = RedisSessionStore::new(pool, "scout:");
        let user = Uuid::nil();
        assert_eq!(store.session_key("abc"), "scout:session:abc");
        assert_eq!(
            store.user_key(&user),
            "scout:user-sessions:00000000-0000-0000-0000-000000000000"
        );
    }
}
