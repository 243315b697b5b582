//! HTTP handlers

pub mod auth;
pub mod groups;
pub mod health;
pub mod reports;
pub mod spray_chart;

use crate::error::ApiError;

/// Unknown `/api/*` paths answer with a JSON 404 instead of the SPA page.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("NOT_FOUND", "Not found".to_string())
}
