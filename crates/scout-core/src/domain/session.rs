//! Server-side session entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scope::TenantScope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random token; the cookie carries it signed.
    pub id: String,
    pub user_id: Uuid,
    pub email: String,
    pub group_id: Uuid,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        id: String,
        user_id: Uuid,
        email: String,
        group_id: Uuid,
        group_name: String,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            email,
            group_id,
            group_name,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    pub fn scope(&self) -> TenantScope {
        TenantScope::new(self.group_id)
    }

    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let live = Session::new("a".into(), Uuid::new_v4(), "e".into(), Uuid::new_v4(), "g".into(), 60);
        assert!(!live.is_expired());
        assert!(live.remaining_seconds() > 0);

        let dead = Session::new("b".into(), Uuid::new_v4(), "e".into(), Uuid::new_v4(), "g".into(), 0);
        assert!(dead.is_expired());
        assert_eq!(dead.remaining_seconds(), 0);
    }

    #[test]
    fn test_scope_uses_group() {
        let group_id = Uuid::new_v4();
        let session = Session::new("a".into(), Uuid::new_v4(), "e".into(), group_id, "g".into(), 60);
        assert_eq!(session.scope(), TenantScope::new(group_id));
    }
}
