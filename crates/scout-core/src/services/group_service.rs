//! Group listing and provisioning

use std::sync::Arc;
use tracing::info;

use crate::domain::Group;
use crate::error::DomainError;
use crate::repositories::GroupRepository;

pub struct GroupService {
    group_repo: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(group_repo: Arc<dyn GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// All groups, ordered by name.
    pub async fn list(&self) -> Result<Vec<Group>, DomainError> {
        self.group_repo.list().await
    }

    /// Return the group with this name, creating it when missing.
    pub async fn ensure_group(
        &self,
        name: &str,
        description: Option<&str>,
        registration_code: &str,
    ) -> Result<Group, DomainError> {
        if let Some(existing) = self.group_repo.find_by_name(name).await? {
            return Ok(existing);
        }

        let group = Group::new(
            name.to_string(),
            description.map(str::to_string),
            registration_code.to_string(),
        )?;
        let created = self.group_repo.create(&group).await?;
        info!("Created group {} ({})", created.name, created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockGroupRepository;

    #[tokio::test]
    async fn test_ensure_group_is_idempotent() {
        let existing = Group::new("Demo Team".into(), None, "DEMO2025".into()).unwrap();
        let mut repo = MockGroupRepository::new();
        let found = existing.clone();
        repo.expect_find_by_name().returning(move |_| Ok(Some(found.clone())));
        repo.expect_create().never();

        let group = GroupService::new(Arc::new(repo))
            .ensure_group("Demo Team", None, "DEMO2025")
            .await
            .unwrap();
        assert_eq!(group.id, existing.id);
    }

    #[tokio::test]
    async fn test_ensure_group_creates_missing() {
        let mut repo = MockGroupRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|g| Ok(g.clone()));

        let group = GroupService::new(Arc::new(repo))
            .ensure_group("Venom 11U Baseball", Some("11U travel"), "VENOM2025")
            .await
            .unwrap();
        assert_eq!(group.registration_code, "VENOM2025");
        assert_eq!(group.description.as_deref(), Some("11U travel"));
    }

    #[tokio::test]
    async fn test_ensure_group_rejects_invalid_code() {
        let mut repo = MockGroupRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        let err = GroupService::new(Arc::new(repo))
            .ensure_group("Demo Team", None, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
