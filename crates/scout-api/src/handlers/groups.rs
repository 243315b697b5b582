use axum::{extract::State, Json};

use crate::dto::GroupResponse;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/groups - public, for the registration form
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GroupResponse>>>, ApiError> {
    let groups = state.groups.list().await?;
    Ok(Json(ApiResponse::success(
        groups.into_iter().map(GroupResponse::from).collect(),
    )))
}
