// ============================================================================
// Scout Infrastructure - PostgreSQL Group Repository
// File: crates/scout-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::{info, error};
use chrono::{DateTime, Utc};

use scout_core::domain::Group;
use scout_core::error::DomainError;
use scout_core::repositories::GroupRepository;

use super::unique_violation;

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub registration_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            description: row.description,
            registration_code: row.registration_code,
            created_at: row.created_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(
            "SELECT id, name, description, registration_code, created_at FROM groups ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing groups", e))?;

        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            "SELECT id, name, description, registration_code, created_at FROM groups WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            "SELECT id, name, description, registration_code, created_at FROM groups WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group by name", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupRow = sqlx::query_as(
            r#"
            INSERT INTO groups (id, name, description, registration_code, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, registration_code, created_at
            "#
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.registration_code)
        .bind(group.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| match unique_violation(&e).as_deref() {
            Some("groups_name_key") => DomainError::GroupNameAlreadyExists(group.name.clone()),
            Some(_) => DomainError::RegistrationCodeAlreadyExists,
            None => db_error("creating group", e),
        })?;

        info!("Group created: {} ({})", row.name, row.id);
        Ok(row.into())
    }
}
