//! Shared application state.
//!
//! Contains the state that is shared across all request handlers: the
//! metric registry and the health reporter. Both are process-wide,
//! constructed once before the listener accepts connections, and
//! dependency-injected rather than global.

use std::sync::Arc;

use crate::health::HealthReporter;
use crate::metrics::Metrics;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler; handlers see shared
/// references, never per-request copies of the registry itself.
#[derive(Clone)]
pub struct AppState {
    /// Metric registry rendered by the /metrics endpoint.
    pub metrics: Metrics,
    /// Health reporter backing the /health endpoint.
    pub health: Arc<HealthReporter>,
}
