//! Root greeting endpoint.

use axum::response::IntoResponse;
use axum::{routing::get, Router};

use crate::state::AppState;

/// Static payload served from the root route, as `text/plain; charset=utf-8`.
const GREETING: &str = "vitals is running. Probe /health, scrape /metrics.\n";

/// Registers the root route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(greeting))
}

async fn greeting() -> impl IntoResponse {
    GREETING
}
