use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

/// Multipart framing and the `mode` field on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize + MULTIPART_OVERHEAD;

    Router::new()
        // Page
        .route("/", get(handlers::index))
        // Settings
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::save_settings),
        )
        // Links
        .route(
            "/api/links",
            post(handlers::create_link).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/status", get(handlers::status))
        // History
        .route("/api/history", get(handlers::list_history))
        .route("/api/history/:index", delete(handlers::delete_history))
        // Internal
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
