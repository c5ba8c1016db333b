//! Metrics recording implementation using Prometheus.

use prometheus::core::Collector;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_gauge_vec_with_registry, CounterVec, Encoder, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use thiserror::Error;

use super::process;

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A metric with this name is already registered. Hitting this during
    /// startup registration is a fatal condition.
    #[error("metric already registered under name '{0}'")]
    DuplicateName(String),

    /// Any other registration or encoding failure.
    #[error("metrics registry error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records one handled HTTP request with its outcome and latency.
    fn record_http_request(&self, path: &str, method: &str, status: u16, duration_secs: f64);
}

/// Prometheus metrics collector.
///
/// Wraps a registry created once at startup together with the handles for
/// the application-defined HTTP metrics. Cloning shares the registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    // Request metrics
    http_requests_total: CounterVec,
    http_request_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Creates a new metrics instance with a Prometheus registry.
    ///
    /// Registers the HTTP request metrics, a build-info gauge, and the
    /// default process collectors. Fails if any registration fails, which
    /// callers must treat as fatal.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Arc::new(Registry::new());

        let http_requests_total = register_counter_vec_with_registry!(
            Opts::new("http_requests_total", "Total number of HTTP requests handled"),
            &["path", "method", "status"],
            registry.clone()
        )?;

        let http_request_duration_seconds = register_histogram_vec_with_registry!(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            &["path", "method"],
            vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0
            ],
            registry.clone()
        )?;

        let build_info = register_int_gauge_vec_with_registry!(
            Opts::new("vitals_build_info", "Build metadata for the running binary"),
            &["version"],
            registry.clone()
        )?;
        build_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .set(1);

        process::register_default_collectors(&registry)?;

        Ok(Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Registers an application-defined collector.
    ///
    /// Fails with [`MetricsError::DuplicateName`] if a metric exposed by the
    /// collector is already registered under the same name. Safe to call
    /// concurrently with rendering.
    pub fn register(&self, collector: Box<dyn Collector>) -> Result<(), MetricsError> {
        let name = collector
            .desc()
            .first()
            .map(|d| d.fq_name.clone())
            .unwrap_or_default();
        self.registry.register(collector).map_err(|e| match e {
            prometheus::Error::AlreadyReg => MetricsError::DuplicateName(name),
            other => MetricsError::Prometheus(other),
        })
    }

    /// Renders all metrics in Prometheus text format.
    ///
    /// Collectors are sampled as part of the gather, so the output is a
    /// point-in-time snapshot. Each metric value is read atomically;
    /// cross-metric consistency over the whole snapshot is not guaranteed.
    pub fn render(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl MetricsRecorder for Metrics {
    fn record_http_request(&self, path: &str, method: &str, status: u16, duration_secs: f64) {
        self.http_requests_total
            .with_label_values(&[path, method, &status.to_string()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[path, method])
            .observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Gauge;

    #[test]
    fn registered_metric_renders_exactly_once() {
        let metrics = Metrics::new().unwrap();
        let gauge = Gauge::with_opts(Opts::new("demo_queue_depth", "Demo gauge")).unwrap();
        metrics.register(Box::new(gauge.clone())).unwrap();
        gauge.set(3.0);

        let output = metrics.render().unwrap();
        let entries: Vec<_> = output
            .lines()
            .filter(|l| !l.starts_with('#') && l.starts_with("demo_queue_depth"))
            .collect();
        assert_eq!(entries, vec!["demo_queue_depth 3"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let metrics = Metrics::new().unwrap();
        let first = Gauge::with_opts(Opts::new("demo_gauge", "Demo gauge")).unwrap();
        let second = Gauge::with_opts(Opts::new("demo_gauge", "Demo gauge")).unwrap();
        metrics.register(Box::new(first)).unwrap();

        let err = metrics.register(Box::new(second)).unwrap_err();
        assert!(matches!(err, MetricsError::DuplicateName(ref name) if name == "demo_gauge"));
    }

    #[test]
    fn first_render_is_well_formed() {
        let metrics = Metrics::new().unwrap();
        let output = metrics.render().unwrap();

        assert!(output.contains("process_uptime_seconds"));
        for line in output.lines().filter(|l| !l.is_empty() && !l.starts_with('#')) {
            let value = line.rsplit(' ').next().unwrap();
            assert!(value.parse::<f64>().is_ok(), "malformed line: {line}");
        }
    }

    #[test]
    fn records_http_requests() {
        let metrics = Metrics::new().unwrap();
        metrics.record_http_request("/health", "GET", 200, 0.004);

        let output = metrics.render().unwrap();
        assert!(output.lines().any(|l| {
            l.starts_with("http_requests_total{")
                && l.contains(r#"path="/health""#)
                && l.contains(r#"status="200""#)
                && l.ends_with(" 1")
        }));
    }
}
