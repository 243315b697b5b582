// ============================================================================
// Scout Infrastructure - In-Memory Repositories
// File: crates/scout-infrastructure/src/memory/repositories.rs
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use scout_core::domain::{Group, ReportFields, ReportSummary, ScoutingReport, TenantScope, User};
use scout_core::error::DomainError;
use scout_core::repositories::{GroupRepository, ReportRepository, UserRepository};

use super::MemoryStore;

pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.store.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.store.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.store.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.store.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(DomainError::DatabaseError(format!("user {} not found", user.id))),
        }
    }
}

pub struct MemoryGroupRepository {
    store: Arc<MemoryStore>,
}

impl MemoryGroupRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let mut groups: Vec<Group> = self.store.groups.read().await.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        Ok(self.store.groups.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        Ok(self
            .store
            .groups
            .read()
            .await
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let mut groups = self.store.groups.write().await;
        if groups.values().any(|g| g.name == group.name) {
            return Err(DomainError::GroupNameAlreadyExists(group.name.clone()));
        }
        if groups.values().any(|g| g.registration_code == group.registration_code) {
            return Err(DomainError::RegistrationCodeAlreadyExists);
        }
        groups.insert(group.id, group.clone());
        Ok(group.clone())
    }
}

pub struct MemoryReportRepository {
    store: Arc<MemoryStore>,
}

impl MemoryReportRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportRepository for MemoryReportRepository {
    async fn list_summaries(&self, scope: TenantScope) -> Result<Vec<ReportSummary>, DomainError> {
        let reports = self.store.reports.read().await;
        let users = self.store.users.read().await;

        let mut visible: Vec<&ScoutingReport> = reports
            .values()
            .filter(|r| scope.permits(r.group_id))
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(visible
            .into_iter()
            .map(|r| {
                let scout = r.user_id.and_then(|id| users.get(&id));
                r.summary(
                    scout.map(|u| u.first_name.clone()),
                    scout.map(|u| u.last_name.clone()),
                )
            })
            .collect())
    }

    async fn find(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError> {
        Ok(self
            .store
            .reports
            .read()
            .await
            .get(id)
            .filter(|r| scope.permits(r.group_id))
            .cloned())
    }

    async fn create(&self, report: &ScoutingReport) -> Result<ScoutingReport, DomainError> {
        self.store.reports.write().await.insert(report.id, report.clone());
        Ok(report.clone())
    }

    async fn update_fields(
        &self,
        scope: TenantScope,
        id: &Uuid,
        fields: &ReportFields,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut reports = self.store.reports.write().await;
        match reports.get_mut(id).filter(|r| scope.permits(r.group_id)) {
            Some(report) => {
                report.fields = fields.clone();
                report.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_spray_chart(
        &self,
        scope: TenantScope,
        id: &Uuid,
        image: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut reports = self.store.reports.write().await;
        match reports.get_mut(id).filter(|r| scope.permits(r.group_id)) {
            Some(report) => {
                report.spray_chart_image = image;
                report.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError> {
        let mut reports = self.store.reports.write().await;
        if !reports.get(id).is_some_and(|r| scope.permits(r.group_id)) {
            return Ok(None);
        }
        Ok(reports.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::domain::Session;

    fn session_for(group: Uuid, user: Uuid) -> Session {
        Session::new("sid".into(), user, "e@x.org".into(), group, "g".into(), 60)
    }

    #[tokio::test]
    async fn test_reports_are_scoped_by_group() {
        let store = MemoryStore::new();
        let repo = MemoryReportRepository::new(store.clone());
        let (team_a, team_b) = (Uuid::new_v4(), Uuid::new_v4());

        let report = ScoutingReport::new(&session_for(team_a, Uuid::new_v4()), ReportFields::default());
        repo.create(&report).await.unwrap();

        let outsider = TenantScope::new(team_b);
        assert!(repo.find(outsider, &report.id).await.unwrap().is_none());
        assert!(repo.list_summaries(outsider).await.unwrap().is_empty());
        assert!(!repo
            .update_fields(outsider, &report.id, &ReportFields::default(), Utc::now())
            .await
            .unwrap());
        assert!(repo.delete(outsider, &report.id).await.unwrap().is_none());

        let member = TenantScope::new(team_a);
        assert!(repo.find(member, &report.id).await.unwrap().is_some());
        assert!(repo.delete(member, &report.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_legacy_reports_visible_to_everyone() {
        let store = MemoryStore::new();
        let repo = MemoryReportRepository::new(store.clone());
        let mut legacy = ScoutingReport::new(&session_for(Uuid::new_v4(), Uuid::new_v4()), ReportFields::default());
        legacy.group_id = None;
        repo.create(&legacy).await.unwrap();

        let anyone = TenantScope::new(Uuid::new_v4());
        assert!(repo.find(anyone, &legacy.id).await.unwrap().is_some());
        assert_eq!(repo.list_summaries(anyone).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_summaries_join_scout_names_newest_first() {
        let store = MemoryStore::new();
        let users = MemoryUserRepository::new(store.clone());
        let reports = MemoryReportRepository::new(store.clone());
        let group = Uuid::new_v4();

        let scout = User::new(group, "scout@team.org", "hash".into(), "Pat", "Lee").unwrap();
        users.create(&scout).await.unwrap();

        let mut older = ScoutingReport::new(&session_for(group, scout.id), ReportFields::default());
        older.created_at = Utc::now() - chrono::Duration::minutes(5);
        let newer = ScoutingReport::new(&session_for(group, Uuid::new_v4()), ReportFields::default());
        reports.create(&older).await.unwrap();
        reports.create(&newer).await.unwrap();

        let list = reports.list_summaries(TenantScope::new(group)).await.unwrap();
        assert_eq!(list[0].id, newer.id);
        assert_eq!(list[0].first_name, None);
        assert_eq!(list[1].first_name.as_deref(), Some("Pat"));
    }

    #[tokio::test]
    async fn test_duplicate_email_and_group_names() {
        let store = MemoryStore::new();
        let users = MemoryUserRepository::new(store.clone());
        let groups = MemoryGroupRepository::new(store.clone());

        let group = Group::new("Demo Team".into(), None, "DEMO2025".into()).unwrap();
        groups.create(&group).await.unwrap();
        let same_name = Group::new("Demo Team".into(), None, "OTHER2025".into()).unwrap();
        assert!(matches!(
            groups.create(&same_name).await,
            Err(DomainError::GroupNameAlreadyExists(_))
        ));
        let same_code = Group::new("Other Team".into(), None, "DEMO2025".into()).unwrap();
        assert!(matches!(
            groups.create(&same_code).await,
            Err(DomainError::RegistrationCodeAlreadyExists)
        ));

        let a = User::new(group.id, "dup@team.org", "h".into(), "A", "B").unwrap();
        let b = User::new(group.id, "DUP@team.org", "h".into(), "C", "D").unwrap();
        users.create(&a).await.unwrap();
        assert!(matches!(users.create(&b).await, Err(DomainError::EmailAlreadyExists(_))));
    }
}
