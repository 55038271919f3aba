use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::JSend;
use crate::workflow::UiState;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: UiState,
}

pub async fn health() -> Json<JSend<HealthResponse>> {
    JSend::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Busy indicator; the page disables its file input while `busy`.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<JSend<StatusResponse>> {
    JSend::success(StatusResponse {
        state: state.workflow.state(),
    })
}
