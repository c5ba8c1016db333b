//! Health check endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};

use crate::health::HealthStatus;
use crate::state::AppState;

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports the aggregate health of the process.
///
/// Returns 200 with `{"status": "UP"}` while no sub-check fails. Once any
/// sub-check reports DOWN the route returns 503 so orchestration probes
/// stop routing traffic; DEGRADED still answers 200.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.health.check();
    let status = match report.status {
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (status, Json(report))
}
