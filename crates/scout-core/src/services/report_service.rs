// ============================================================================
// Scout Core - Report Service
// File: crates/scout-core/src/services/report_service.rs
// ============================================================================
//! Tenant-scoped report CRUD and spray chart attachment handling

use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use tracing::{debug, info, warn};

use crate::domain::{ImageUpload, ReportFields, ReportSummary, ScoutingReport, Session, TenantScope};
use crate::error::DomainError;
use crate::repositories::{AttachmentStore, ReportRepository};

pub struct ReportService {
    report_repo: Arc<dyn ReportRepository>,
    attachments: Arc<dyn AttachmentStore>,
    max_upload_bytes: usize,
}

impl ReportService {
    pub fn new(
        report_repo: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentStore>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            report_repo,
            attachments,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<ReportSummary>, DomainError> {
        let reports = self.report_repo.list_summaries(scope).await?;
        debug!("Group {} sees {} report(s)", scope.group_id, reports.len());
        Ok(reports)
    }

    pub async fn get(&self, scope: TenantScope, id: &Uuid) -> Result<ScoutingReport, DomainError> {
        self.report_repo
            .find(scope, id)
            .await?
            .ok_or(DomainError::ReportNotFound)
    }

    pub async fn create(&self, owner: &Session, fields: ReportFields) -> Result<ScoutingReport, DomainError> {
        let report = ScoutingReport::new(owner, fields);
        let created = self.report_repo.create(&report).await?;
        info!(
            "Report {} created by user {} in group {} ({} field(s) filled)",
            created.id,
            owner.user_id,
            owner.group_id,
            created.fields.filled()
        );
        Ok(created)
    }

    pub async fn update(&self, scope: TenantScope, id: &Uuid, fields: ReportFields) -> Result<(), DomainError> {
        let matched = self.report_repo.update_fields(scope, id, &fields, Utc::now()).await?;
        if !matched {
            warn!("Update of report {} denied or not found for group {}", id, scope.group_id);
            return Err(DomainError::ReportNotFound);
        }
        info!("Report {} updated", id);
        Ok(())
    }

    /// Delete the report, then its attachment file.
    pub async fn delete(&self, scope: TenantScope, id: &Uuid) -> Result<(), DomainError> {
        let removed = self.report_repo.delete(scope, id).await?.ok_or_else(|| {
            warn!("Delete of report {} denied or not found for group {}", id, scope.group_id);
            DomainError::ReportNotFound
        })?;

        if let Some(image) = removed.spray_chart_image.as_deref() {
            self.attachments.remove(image).await?;
        }
        info!("Report {} deleted", id);
        Ok(())
    }

    /// Store a new spray chart for the report and drop the previous file.
    /// Returns the stored file name.
    pub async fn attach_spray_chart(
        &self,
        scope: TenantScope,
        id: &Uuid,
        upload: ImageUpload,
    ) -> Result<String, DomainError> {
        upload.validate(self.max_upload_bytes)?;

        let report = self.get(scope, id).await?;
        let stored_name = upload.stored_name();
        self.attachments.save(&stored_name, &upload.data).await?;

        let linked = self
            .report_repo
            .set_spray_chart(scope, id, Some(stored_name.clone()), Utc::now())
            .await;
        match linked {
            Ok(true) => {}
            Ok(false) => {
                self.attachments.remove(&stored_name).await?;
                return Err(DomainError::ReportNotFound);
            }
            Err(e) => {
                if let Err(cleanup) = self.attachments.remove(&stored_name).await {
                    warn!("Failed to remove unlinked upload {}: {}", stored_name, cleanup);
                }
                return Err(e);
            }
        }

        if let Some(previous) = report.spray_chart_image.as_deref() {
            self.attachments.remove(previous).await?;
        }

        info!("Spray chart {} attached to report {}", stored_name, id);
        Ok(stored_name)
    }

    pub async fn remove_spray_chart(&self, scope: TenantScope, id: &Uuid) -> Result<(), DomainError> {
        let report = self.get(scope, id).await?;
        let image = report.spray_chart_image.ok_or(DomainError::SprayChartNotFound)?;

        self.attachments.remove(&image).await?;
        if !self.report_repo.set_spray_chart(scope, id, None, Utc::now()).await? {
            return Err(DomainError::ReportNotFound);
        }
        info!("Spray chart {} removed from report {}", image, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockAttachmentStore, MockReportRepository};

    fn session() -> Session {
        Session::new("sid".into(), Uuid::new_v4(), "e".into(), Uuid::new_v4(), "Demo".into(), 60)
    }

    fn png() -> ImageUpload {
        ImageUpload::new(Some("chart.png".into()), Some("image/png".into()), vec![1, 2, 3])
    }

    fn service(reports: MockReportRepository, files: MockAttachmentStore) -> ReportService {
        ReportService::new(Arc::new(reports), Arc::new(files), 1024)
    }

    #[tokio::test]
    async fn test_get_out_of_scope_is_not_found() {
        let mut reports = MockReportRepository::new();
        reports.expect_find().returning(|_, _| Ok(None));
        let err = service(reports, MockAttachmentStore::new())
            .get(session().scope(), &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReportNotFound));
    }

    #[tokio::test]
    async fn test_update_unmatched_is_not_found() {
        let mut reports = MockReportRepository::new();
        reports.expect_update_fields().returning(|_, _, _, _| Ok(false));
        let err = service(reports, MockAttachmentStore::new())
            .update(session().scope(), &Uuid::new_v4(), ReportFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReportNotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_attachment() {
        let owner = session();
        let mut report = ScoutingReport::new(&owner, ReportFields::default());
        report.spray_chart_image = Some("spray-chart-old.png".into());

        let mut reports = MockReportRepository::new();
        reports.expect_delete().returning(move |_, _| Ok(Some(report.clone())));
        let mut files = MockAttachmentStore::new();
        files.expect_remove().times(1).returning(|_| Ok(()));

        service(reports, files)
            .delete(owner.scope(), &Uuid::new_v4())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_second_upload_replaces_previous_file() {
        let owner = session();
        let mut report = ScoutingReport::new(&owner, ReportFields::default());
        report.spray_chart_image = Some("spray-chart-old.png".into());

        let mut reports = MockReportRepository::new();
        reports.expect_find().returning(move |_, _| Ok(Some(report.clone())));
        reports.expect_set_spray_chart().times(1).returning(|_, _, _, _| Ok(true));
        let mut files = MockAttachmentStore::new();
        files.expect_save().times(1).returning(|_, _| Ok(()));
        files
            .expect_remove()
            .times(1)
            .returning(|name| {
                assert_eq!(name, "spray-chart-old.png");
                Ok(())
            });

        let stored = service(reports, files)
            .attach_spray_chart(owner.scope(), &Uuid::new_v4(), png())
            .await
            .unwrap();
        assert!(stored.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_upload_to_hidden_report_stores_nothing() {
        let mut reports = MockReportRepository::new();
        reports.expect_find().returning(|_, _| Ok(None));
        let mut files = MockAttachmentStore::new();
        files.expect_save().never();

        let err = service(reports, files)
            .attach_spray_chart(session().scope(), &Uuid::new_v4(), png())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReportNotFound));
    }

    #[tokio::test]
    async fn test_failed_link_removes_new_file() {
        let owner = session();
        let report = ScoutingReport::new(&owner, ReportFields::default());

        let mut reports = MockReportRepository::new();
        reports.expect_find().returning(move |_, _| Ok(Some(report.clone())));
        reports
            .expect_set_spray_chart()
            .returning(|_, _, _, _| Err(DomainError::DatabaseError("down".into())));
        let mut files = MockAttachmentStore::new();
        files.expect_save().returning(|_, _| Ok(()));
        files.expect_remove().times(1).returning(|_| Ok(()));

        let err = service(reports, files)
            .attach_spray_chart(owner.scope(), &Uuid::new_v4(), png())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_remove_without_image() {
        let owner = session();
        let report = ScoutingReport::new(&owner, ReportFields::default());
        let mut reports = MockReportRepository::new();
        reports.expect_find().returning(move |_, _| Ok(Some(report.clone())));

        let err = service(reports, MockAttachmentStore::new())
            .remove_spray_chart(owner.scope(), &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SprayChartNotFound));
    }

    #[tokio::test]
    async fn test_rejects_non_image_before_touching_storage() {
        let mut files = MockAttachmentStore::new();
        files.expect_save().never();
        let upload = ImageUpload::new(Some("a.txt".into()), Some("text/plain".into()), vec![1]);
        let err = service(MockReportRepository::new(), files)
            .attach_spray_chart(session().scope(), &Uuid::new_v4(), upload)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedMediaType(_)));
    }
}
