// ============================================================================
// Scout Infrastructure - PostgreSQL Scouting Report Repository
// File: crates/scout-infrastructure/src/database/postgres/report_repo_impl.rs
// ============================================================================
//! The report table is wide (one TEXT column per form field), so statements
//! are assembled from `REPORT_FIELDS` with `QueryBuilder` rather than spelled
//! out. Every statement that touches an existing row carries the tenant
//! predicate `(group_id = $n OR group_id IS NULL)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use scout_core::domain::{ReportFields, ReportSummary, ScoutingReport, TenantScope, REPORT_FIELDS};
use scout_core::error::DomainError;
use scout_core::repositories::ReportRepository;

/// Full column list in select order.
static REPORT_COLUMNS: Lazy<String> = Lazy::new(|| {
    let mut columns = vec!["id", "user_id", "group_id"];
    columns.extend_from_slice(REPORT_FIELDS);
    columns.extend_from_slice(&["spray_chart_image", "created_at", "updated_at"]);
    columns.join(", ")
});

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportSummaryRow {
    pub id: Uuid,
    pub player_name: Option<String>,
    pub primary_position: Option<String>,
    pub team: Option<String>,
    pub scout_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<ReportSummaryRow> for ReportSummary {
    fn from(row: ReportSummaryRow) -> Self {
        ReportSummary {
            id: row.id,
            player_name: row.player_name,
            primary_position: row.primary_position,
            team: row.team,
            scout_date: row.scout_date,
            created_at: row.created_at,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

fn report_from_row(row: &PgRow) -> Result<ScoutingReport, sqlx::Error> {
    Ok(ScoutingReport {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        group_id: row.try_get("group_id")?,
        fields: ReportFields::try_from_columns(|name| row.try_get::<Option<String>, _>(name))?,
        spray_chart_image: row.try_get("spray_chart_image")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn push_scope(query: &mut QueryBuilder<'_, Postgres>, scope: TenantScope) {
    query
        .push(" AND (group_id = ")
        .push_bind(scope.group_id)
        .push(" OR group_id IS NULL)");
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn list_summaries(&self, scope: TenantScope) -> Result<Vec<ReportSummary>, DomainError> {
        let rows: Vec<ReportSummaryRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.player_name, r.primary_position, r.team, r.scout_date,
                   r.created_at, u.first_name, u.last_name
            FROM scouting_reports r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.group_id = $1 OR r.group_id IS NULL
            ORDER BY r.created_at DESC
            "#
        )
        .bind(scope.group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing reports", e))?;

        Ok(rows.into_iter().map(ReportSummary::from).collect())
    }

    async fn find(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query
            .push(REPORT_COLUMNS.as_str())
            .push(" FROM scouting_reports WHERE id = ")
            .push_bind(*id);
        push_scope(&mut query, scope);

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding report", e))?;

        row.as_ref()
            .map(report_from_row)
            .transpose()
            .map_err(|e| db_error("decoding report", e))
    }

    async fn create(&self, report: &ScoutingReport) -> Result<ScoutingReport, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("INSERT INTO scouting_reports (");
        query.push(REPORT_COLUMNS.as_str()).push(") VALUES (");

        let mut values = query.separated(", ");
        values.push_bind(report.id);
        values.push_bind(report.user_id);
        values.push_bind(report.group_id);
        for (_, value) in report.fields.values() {
            values.push_bind(value.map(str::to_owned));
        }
        values.push_bind(report.spray_chart_image.clone());
        values.push_bind(report.created_at);
        values.push_bind(report.updated_at);
        values.push_unseparated(") RETURNING ");
        values.push_unseparated(REPORT_COLUMNS.as_str());

        let row = query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("creating report", e))?;

        let created = report_from_row(&row).map_err(|e| db_error("decoding report", e))?;
        info!("Report row inserted: {}", created.id);
        Ok(created)
    }

    async fn update_fields(
        &self,
        scope: TenantScope,
        id: &Uuid,
        fields: &ReportFields,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE scouting_reports SET ");
        let mut assignments = query.separated(", ");
        for (name, value) in fields.values() {
            assignments.push(name);
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(value.map(str::to_owned));
        }
        assignments.push("updated_at = ");
        assignments.push_bind_unseparated(updated_at);

        query.push(" WHERE id = ").push_bind(*id);
        push_scope(&mut query, scope);

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("updating report", e))?;

        debug!("Report {} update matched {} row(s)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn set_spray_chart(
        &self,
        scope: TenantScope,
        id: &Uuid,
        image: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE scouting_reports
            SET spray_chart_image = $3, updated_at = $4
            WHERE id = $1 AND (group_id = $2 OR group_id IS NULL)
            "#
        )
        .bind(id)
        .bind(scope.group_id)
        .bind(image)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("setting spray chart", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, scope: TenantScope, id: &Uuid) -> Result<Option<ScoutingReport>, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("DELETE FROM scouting_reports WHERE id = ");
        query.push_bind(*id);
        push_scope(&mut query, scope);
        query.push(" RETURNING ").push(REPORT_COLUMNS.as_str());

        let row = query
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("deleting report", e))?;

        row.as_ref()
            .map(report_from_row)
            .transpose()
            .map_err(|e| db_error("decoding report", e))
    }
}
