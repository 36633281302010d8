//! HTTP mapping for errors surfaced by gateway handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use reqmeter_core::error::{ErrorKind, ReqMeterError};

/// Handler-level error. Renders as `{"error": KIND, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ReqMeterError);

impl From<ReqMeterError> for ApiError {
    fn from(e: ReqMeterError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::LabelArityMismatch | ErrorKind::InvalidDelta | ErrorKind::InvalidValue => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::DuplicateMetricName
            | ErrorKind::InvalidDefinition
            | ErrorKind::SnapshotFailure
            | ErrorKind::Config
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.kind().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
