// ============================================================================
// Scout API - Spray Chart Handlers
// File: crates/scout-api/src/handlers/spray_chart.rs
// ============================================================================

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Extension, Json,
};
use scout_core::domain::{ImageUpload, Session};
use scout_shared::constants::{SPRAY_CHART_FIELD, UPLOADS_ROUTE};
use tracing::{debug, info};

use crate::dto::SprayChartResponse;
use crate::error::ApiError;
use crate::handlers::reports::report_id;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/reports/{id}/spray-chart - multipart, single `sprayChart` file
pub async fn upload(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<SprayChartResponse>>, ApiError> {
    let id = report_id(&id)?;
    let mut multipart = multipart?;
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name != SPRAY_CHART_FIELD {
            debug!("Skipping multipart field {:?}", name);
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::validation("Only one file may be uploaded"));
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        upload = Some(ImageUpload::new(file_name, content_type, data.to_vec()));
    }

    let upload = upload.ok_or_else(|| ApiError::from(scout_core::DomainError::NoFileUploaded))?;
    let stored = state
        .reports
        .attach_spray_chart(session.scope(), &id, upload)
        .await?;

    info!("User {} uploaded spray chart for report {}", session.user_id, id);
    Ok(Json(ApiResponse::success(SprayChartResponse {
        message: "Spray chart uploaded successfully".to_string(),
        image_path: format!("{}/{}", UPLOADS_ROUTE, stored),
    })))
}

/// DELETE /api/reports/{id}/spray-chart
pub async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = report_id(&id)?;
    state.reports.remove_spray_chart(session.scope(), &id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Spray chart deleted successfully",
    ))))
}
