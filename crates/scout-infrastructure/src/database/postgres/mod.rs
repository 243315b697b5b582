//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod group_repo_impl;
pub mod report_repo_impl;
pub mod session_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use group_repo_impl::PgGroupRepository;
pub use report_repo_impl::PgReportRepository;
pub use session_repo_impl::PgSessionRepository;

/// Name of the unique constraint or index a statement violated, if any.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    let db = e.as_database_error()?;
    if db.is_unique_violation() {
        Some(db.constraint().unwrap_or_default().to_string())
    } else {
        None
    }
}
