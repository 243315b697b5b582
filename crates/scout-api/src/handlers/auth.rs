// ============================================================================
// Scout API - Auth Handlers
// File: crates/scout-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, register, logout, me)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    Extension, Json,
};
use scout_core::domain::Session;
use tracing::warn;

use crate::dto::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use crate::error::ApiError;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.check()?;

    // A fresh login replaces whatever session the browser still carries
    if let Some(previous) = state.cookies.session_id(&headers) {
        if let Err(e) = state.auth.logout(&previous).await {
            warn!("Could not close previous session: {}", e);
        }
    }

    let result = state.auth.login(&payload.email, &payload.password).await?;
    let cookie = state.cookies.issue(&result.session)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::success(AuthResponse {
            message: "Login successful".to_string(),
            user: result.user,
        })),
    ))
}

/// Register handler - POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let Json(payload) = payload?;
    payload.check()?;

    let user = state.auth.register(payload.into_command()).await?;
    Ok(Json(ApiResponse::success(AuthResponse {
        message: "Registration successful! You can now login.".to_string(),
        user,
    })))
}

/// Logout handler - POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(session_id) = state.cookies.session_id(&headers) {
        state.auth.logout(&session_id).await?;
    }
    Ok((
        [(SET_COOKIE, state.cookies.clear()?)],
        Json(ApiResponse::success(MessageResponse::new("Logout successful"))),
    ))
}

/// Current user - GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let user = state.auth.current_user(&session).await?;
    Ok(Json(ApiResponse::success(MeResponse { user })))
}
