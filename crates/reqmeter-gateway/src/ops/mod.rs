//! Operational HTTP endpoints.
//!
//! - `/test`    : liveness, never touches the registry
//! - `/metrics` : Prometheus text format (path configurable)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use reqmeter_core::TEXT_CONTENT_TYPE;

use crate::app_state::AppState;
use crate::error::ApiError;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "message": "ok" }))
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    if let Some(process) = state.process_metrics() {
        process.refresh();
    }
    let body = state.registry().snapshot().map_err(|e| {
        tracing::error!(error.kind = e.kind().as_str(), error = %e, "metrics snapshot failed");
        ApiError(e)
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response())
}
