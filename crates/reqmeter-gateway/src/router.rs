//! Axum router wiring.
//!
//! Exposes the liveness route and the metrics route, plus any application
//! routes the caller passes in. The request metrics layer is applied last so
//! it wraps every route and the fallback.

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::{app_state::AppState, middleware, ops};

pub const HEALTH_PATH: &str = "/test";

pub fn build_router(state: AppState) -> Router {
    build_router_with(state, Router::new())
}

/// Merge `routes` with the operational endpoints and instrument all of them.
///
/// `routes` must not define [`HEALTH_PATH`] or the configured metrics path.
pub fn build_router_with(state: AppState, routes: Router<AppState>) -> Router {
    let metrics_path = state.cfg().metrics.path.clone();
    let mut router = routes
        .route(HEALTH_PATH, get(ops::health))
        .route(&metrics_path, get(ops::metrics));

    if let Some(http) = state.http_metrics() {
        router = router.layer(from_fn_with_state(http, middleware::track_requests));
    }

    router.with_state(state)
}
