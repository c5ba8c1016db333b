//! HTTP route definitions and handlers.
//!
//! This module organizes the endpoints into logical groups: the root
//! greeting, health checks, and metrics exposition. Unmatched paths fall
//! through to axum's default empty 404 response.

mod greeting_routes;
mod health_routes;
mod metrics_routes;

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;

use crate::metrics::MetricsRecorder;
use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, layers the
/// request-metrics middleware over them, and attaches the application state
/// for access in handlers. Registering the same (method, path) pair twice
/// panics here, at startup, before the listener accepts connections.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(greeting_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .with_state(state)
}

/// Records count and latency for every handled request.
///
/// The matched route pattern is preferred over the raw path as the `path`
/// label so unmatched requests cannot inflate label cardinality per-URL.
async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = req.method().as_str().to_owned();

    let response = next.run(req).await;

    state.metrics.record_http_request(
        &path,
        &method,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
