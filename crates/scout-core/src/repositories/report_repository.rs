//! Scouting report repository trait (port)
//!
//! Every read and write takes the caller's `TenantScope`; implementations
//! must apply it inside the query so that out-of-scope rows are never touched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::{ReportFields, ReportSummary, ScoutingReport, TenantScope};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Summaries visible in `scope`, newest first.
    async fn list_summaries(&self, scope: TenantScope) -> Result<Vec<ReportSummary>, DomainError>;

    async fn find(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError>;

    async fn create(&self, report: &ScoutingReport) -> Result<ScoutingReport, DomainError>;

    /// Overwrite all form fields. `false` when no visible report matched.
    async fn update_fields(
        &self,
        scope: TenantScope,
        id: &Uuid,
        fields: &ReportFields,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Set or clear the attachment reference. `false` when no visible report matched.
    async fn set_spray_chart(
        &self,
        scope: TenantScope,
        id: &Uuid,
        image: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete and return the removed report, `None` when no visible report matched.
    async fn delete(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError>;
}
