//! Default process collectors sampled at exposition time.
//!
//! On Linux the Prometheus process collector reads CPU seconds, resident
//! memory, process start time, and open file descriptors from `/proc/self`
//! during each gather. Samples that cannot be read on the current platform
//! are omitted from the exposition rather than reported as errors.

use std::time::Instant;

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts, Registry};

#[cfg(target_os = "linux")]
use prometheus::process_collector::ProcessCollector;

use super::recorder::MetricsError;

/// Registers the default collector set on the given registry.
pub fn register_default_collectors(registry: &Registry) -> Result<(), MetricsError> {
    #[cfg(target_os = "linux")]
    registry.register(Box::new(ProcessCollector::for_self()))?;

    registry.register(Box::new(UptimeCollector::new()?))?;
    Ok(())
}

/// Reports seconds since process start, sampled when the registry gathers.
pub struct UptimeCollector {
    started: Instant,
    uptime: Gauge,
}

impl UptimeCollector {
    pub fn new() -> Result<Self, MetricsError> {
        let uptime = Gauge::with_opts(Opts::new(
            "process_uptime_seconds",
            "Seconds elapsed since the process started.",
        ))?;
        Ok(UptimeCollector {
            started: Instant::now(),
            uptime,
        })
    }
}

impl Collector for UptimeCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.uptime.desc()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.uptime.set(self.started.elapsed().as_secs_f64());
        self.uptime.collect()
    }
}
