//! Health status aggregation.

use serde::Serialize;

/// Coarse liveness signal for the process.
///
/// Variants are ordered by severity; `Down` is the most severe and wins
/// any aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Degraded,
    Down,
}

/// Outcome of a health evaluation, serialized as `{"status": ..., "reason": ...?}`.
///
/// Produced fresh on every check; carries no identity or persistence.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthReport {
    pub fn up() -> Self {
        HealthReport {
            status: HealthStatus::Up,
            reason: None,
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        HealthReport {
            status: HealthStatus::Degraded,
            reason: Some(reason.into()),
        }
    }

    pub fn down(reason: impl Into<String>) -> Self {
        HealthReport {
            status: HealthStatus::Down,
            reason: Some(reason.into()),
        }
    }
}

/// A single named sub-check feeding the aggregate report.
pub trait HealthCheck: Send + Sync {
    /// Name used to attribute failure reasons in the aggregate report.
    fn name(&self) -> &str;

    /// Evaluates the check. Must be cheap and non-blocking; the HTTP
    /// handler calls it on every probe.
    fn check(&self) -> HealthReport;
}

/// Aggregates sub-checks into a single process-level report.
///
/// The default reporter has no sub-checks and always reports UP. This is a
/// placeholder contract: a real service registers dependency checks via
/// [`HealthReporter::add_check`] and the HTTP surface needs no change.
#[derive(Default)]
pub struct HealthReporter {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sub-check.
    pub fn add_check(&mut self, check: Box<dyn HealthCheck>) {
        self.checks.push(check);
    }

    /// Evaluates all sub-checks and returns the aggregate report.
    ///
    /// The aggregate status is the most severe sub-check status. Reasons of
    /// the sub-checks at that status are joined, attributed by check name.
    pub fn check(&self) -> HealthReport {
        let mut worst = HealthStatus::Up;
        let mut reasons: Vec<String> = Vec::new();

        for check in &self.checks {
            let report = check.check();
            if report.status > worst {
                worst = report.status;
                reasons.clear();
            }
            if report.status == worst && worst != HealthStatus::Up {
                match report.reason {
                    Some(reason) => reasons.push(format!("{}: {}", check.name(), reason)),
                    None => reasons.push(check.name().to_string()),
                }
            }
        }

        HealthReport {
            status: worst,
            reason: if reasons.is_empty() {
                None
            } else {
                Some(reasons.join("; "))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticCheck {
        name: &'static str,
        report: HealthReport,
    }

    impl HealthCheck for StaticCheck {
        fn name(&self) -> &str {
            self.name
        }

        fn check(&self) -> HealthReport {
            self.report.clone()
        }
    }

    fn reporter_with(reports: Vec<(&'static str, HealthReport)>) -> HealthReporter {
        let mut reporter = HealthReporter::new();
        for (name, report) in reports {
            reporter.add_check(Box::new(StaticCheck { name, report }));
        }
        reporter
    }

    #[test]
    fn empty_reporter_is_up() {
        let report = HealthReporter::new().check();
        assert_eq!(report.status, HealthStatus::Up);
        assert!(report.reason.is_none());
    }

    #[test]
    fn down_wins_over_degraded_and_up() {
        let reporter = reporter_with(vec![
            ("cache", HealthReport::up()),
            ("store", HealthReport::down("connection refused")),
            ("queue", HealthReport::degraded("slow consumer")),
        ]);

        let report = reporter.check();
        assert_eq!(report.status, HealthStatus::Down);
        assert_eq!(report.reason.as_deref(), Some("store: connection refused"));
    }

    #[test]
    fn degraded_wins_over_up() {
        let reporter = reporter_with(vec![
            ("cache", HealthReport::up()),
            ("queue", HealthReport::degraded("slow consumer")),
        ]);

        let report = reporter.check();
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.reason.as_deref(), Some("queue: slow consumer"));
    }

    #[test]
    fn all_up_stays_up_with_no_reason() {
        let reporter = reporter_with(vec![
            ("cache", HealthReport::up()),
            ("store", HealthReport::up()),
        ]);

        let report = reporter.check();
        assert_eq!(report.status, HealthStatus::Up);
        assert!(report.reason.is_none());
    }

    #[test]
    fn reasons_at_worst_status_are_joined() {
        let reporter = reporter_with(vec![
            ("store", HealthReport::down("connection refused")),
            ("queue", HealthReport::degraded("slow consumer")),
            ("ledger", HealthReport::down("timeout")),
        ]);

        let report = reporter.check();
        assert_eq!(report.status, HealthStatus::Down);
        assert_eq!(
            report.reason.as_deref(),
            Some("store: connection refused; ledger: timeout")
        );
    }

    #[test]
    fn severity_order_is_down_over_degraded_over_up() {
        assert!(HealthStatus::Down > HealthStatus::Degraded);
        assert!(HealthStatus::Degraded > HealthStatus::Up);
    }

    #[test]
    fn report_serializes_without_absent_reason() {
        let up = serde_json::to_value(HealthReport::up()).unwrap();
        assert_eq!(up["status"], "UP");
        assert!(up.get("reason").is_none());

        let down = serde_json::to_value(HealthReport::down("unreachable")).unwrap();
        assert_eq!(down["status"], "DOWN");
        assert_eq!(down["reason"], "unreachable");
    }
}
