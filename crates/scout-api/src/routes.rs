//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{any, get, post},
    Router,
};
use scout_shared::constants::UPLOADS_ROUTE;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, auth, groups, health, reports, spray_chart};
use crate::middleware::require_session;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.reports.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/reports", get(reports::list).post(reports::create))
        .route(
            "/api/reports/{id}",
            get(reports::get).put(reports::update).delete(reports::delete),
        )
        .route(
            "/api/reports/{id}/spray-chart",
            post(spray_chart::upload)
                .delete(spray_chart::remove)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/groups", get(groups::list))
        .route("/api/{*path}", any(handlers::api_not_found));

    let uploads = ServeDir::new(&state.upload_dir);
    let spa = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service(UPLOADS_ROUTE, uploads)
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
