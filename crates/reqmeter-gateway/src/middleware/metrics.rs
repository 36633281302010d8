//! Request metrics interceptor.
//!
//! Wraps every routed request: captures a monotonic start time, runs the
//! inner service exactly once, then records duration, count and in-flight
//! changes under `(method, route, status_code)`. The response passes through
//! untouched and recording failures are only logged.
//!
//! If the request future is dropped before the handler returns (client gone,
//! timeout layer, shutdown) the observation is still recorded, with status
//! `aborted`. A panicking handler is recorded as `500` and the panic is
//! resumed unchanged.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::obs::metrics::{method_label, HttpLabels, HttpMetrics, STATUS_ABORTED};

/// Use with `axum::middleware::from_fn_with_state(http_metrics, track_requests)`
/// via `Router::layer`, so the matched route template is visible here.
pub async fn track_requests(
    State(metrics): State<HttpMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = method_label(request.method());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let mut tracker = RequestTracker::start(metrics, method, route);
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => {
            tracker.record(Outcome::Completed(response.status()));
            response
        }
        Err(panic) => {
            tracker.record(Outcome::Panicked);
            std::panic::resume_unwind(panic)
        }
    }
}

/// How the wrapped handler ended.
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Completed(StatusCode),
    Aborted,
    Panicked,
}

/// Per-request recorder. Records exactly once: explicitly, or as aborted on drop.
struct RequestTracker {
    metrics: HttpMetrics,
    method: &'static str,
    route: Option<String>,
    start: Instant,
    recorded: bool,
}

impl RequestTracker {
    fn start(metrics: HttpMetrics, method: &'static str, route: Option<String>) -> Self {
        if let Err(e) = metrics.request_started() {
            tracing::warn!(error.kind = e.kind().as_str(), error = %e, "in-flight gauge update failed");
        }
        Self {
            metrics,
            method,
            route,
            start: Instant::now(),
            recorded: false,
        }
    }

    fn record(&mut self, outcome: Outcome) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        let elapsed = self.start.elapsed();
        let status_code = match outcome {
            Outcome::Completed(status) => status.as_str().to_owned(),
            Outcome::Aborted => STATUS_ABORTED.to_owned(),
            Outcome::Panicked => StatusCode::INTERNAL_SERVER_ERROR.as_str().to_owned(),
        };
        let route = self
            .route
            .as_deref()
            .unwrap_or_else(|| self.metrics.unmatched_route());
        let labels = HttpLabels {
            method: self.method,
            route,
            status_code: &status_code,
        };

        if let Err(e) = self.metrics.request_finished(&labels, elapsed) {
            tracing::warn!(
                error.kind = e.kind().as_str(),
                error = %e,
                "dropping request observation"
            );
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        match outcome {
            Outcome::Completed(_) => tracing::info!(
                method = labels.method,
                route = labels.route,
                status = labels.status_code,
                elapsed_ms,
                "request completed"
            ),
            Outcome::Aborted => tracing::warn!(
                method = labels.method,
                route = labels.route,
                elapsed_ms,
                "request aborted before completion"
            ),
            Outcome::Panicked => tracing::error!(
                method = labels.method,
                route = labels.route,
                elapsed_ms,
                "handler panicked"
            ),
        }
    }
}

impl Drop for RequestTracker {
    fn drop(&mut self) {
        self.record(Outcome::Aborted);
    }
}
