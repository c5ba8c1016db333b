//! Metrics collection and exposition for Prometheus.
//!
//! The registry is constructed once at startup, injected into the HTTP
//! state, and rendered on demand by the /metrics endpoint. Default process
//! collectors are sampled synchronously as part of each render; there is no
//! background sampling timer.

mod process;
mod recorder;

pub use process::UptimeCollector;
pub use recorder::{Metrics, MetricsError, MetricsRecorder};
