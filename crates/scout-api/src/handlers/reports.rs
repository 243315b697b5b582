// ============================================================================
// Scout API - Report Handlers
// File: crates/scout-api/src/handlers/reports.rs
// ============================================================================
//! Tenant-scoped report CRUD. The scope always comes from the session, never
//! from the request.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use scout_core::domain::{ReportFields, ReportSummary, ScoutingReport, Session};
use scout_shared::EntityId;

use crate::dto::CreatedReportResponse;
use crate::error::ApiError;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

pub(crate) fn report_id(raw: &str) -> Result<EntityId, ApiError> {
    scout_shared::parse_id(raw).ok_or_else(ApiError::invalid_report_id)
}

/// GET /api/reports
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Vec<ReportSummary>>>, ApiError> {
    let reports = state.reports.list(session.scope()).await?;
    Ok(Json(ApiResponse::success(reports)))
}

/// GET /api/reports/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScoutingReport>>, ApiError> {
    let id = report_id(&id)?;
    let report = state.reports.get(session.scope(), &id).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<ReportFields>, JsonRejection>,
) -> Result<Json<ApiResponse<CreatedReportResponse>>, ApiError> {
    let Json(fields) = payload?;
    let report = state.reports.create(&session, fields).await?;
    Ok(Json(ApiResponse::success(CreatedReportResponse {
        id: report.id,
        message: "Report created successfully".to_string(),
    })))
}

/// PUT /api/reports/{id} - full overwrite of the form fields
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    payload: Result<Json<ReportFields>, JsonRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = report_id(&id)?;
    let Json(fields) = payload?;
    state.reports.update(session.scope(), &id, fields).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Report updated successfully",
    ))))
}

/// DELETE /api/reports/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = report_id(&id)?;
    state.reports.delete(session.scope(), &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Report deleted successfully",
    ))))
}
