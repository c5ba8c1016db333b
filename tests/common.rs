use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;

use vitals::health::HealthReporter;
use vitals::metrics::Metrics;
use vitals::routes::create_router;
use vitals::state::AppState;

pub fn build_app() -> Router {
    build_app_with_reporter(HealthReporter::new())
}

pub fn build_app_with_reporter(health: HealthReporter) -> Router {
    let metrics = Metrics::new().expect("metrics registry should initialize");

    let state = AppState {
        metrics,
        health: Arc::new(health),
    };

    create_router(state)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}
