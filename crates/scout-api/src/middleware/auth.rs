//! Session authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the session cookie and expose the `Session` to handlers as a
/// request extension. Requests without a live session get 401.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = state
        .cookies
        .session_id(request.headers())
        .ok_or_else(ApiError::unauthenticated)?;

    let session = state
        .auth
        .resolve_session(&session_id)
        .await?
        .ok_or_else(|| {
            debug!("Session cookie refers to an unknown or expired session");
            ApiError::unauthenticated()
        })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
