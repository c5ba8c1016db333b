//! Metrics exposition endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;

use crate::state::AppState;

/// Content type mandated by the Prometheus text exposition format.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Creates the metrics route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Handler for the /metrics endpoint.
///
/// Returns all collected metrics in Prometheus text format. Default process
/// collectors are sampled inside the render, not on a background timer, so
/// the scraper always sees a fresh snapshot. Rendering is designed not to
/// fail on unavailable samples; a genuine encoding failure is logged and
/// answered with a 500, never a crash.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics_text) => (
            StatusCode::OK,
            [(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            metrics_text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics rendering failed").into_response()
        }
    }
}
