//! Remediation guidance derived from a tension result.

use serde::{Deserialize, Serialize};

use super::analyzer::{Contributor, TensionResult, Trend};
use super::metrics::MetricKind;

/// Normalized stress at or above which a contributor needs urgent action.
pub const SEVERE_THRESHOLD: f64 = 80.0;

/// Normalized stress at or above which a contributor should be watched.
pub const ELEVATED_THRESHOLD: f64 = 50.0;

/// Contributors inspected, highest impact first.
pub const MAX_CONTRIBUTORS_CONSIDERED: usize = 5;

/// Severity of a recommendation, most pressing first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Urgent,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Urgent => "Urgent",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

/// One piece of guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    /// Metric the guidance is about, if any.
    pub source: Option<MetricKind>,
    pub message: String,
}

impl Recommendation {
    fn new(severity: Severity, source: Option<MetricKind>, message: impl Into<String>) -> Self {
        Self {
            severity,
            source,
            message: message.into(),
        }
    }
}

fn urgent_guidance(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::ErrorRate => {
            "Error rate is severe: inspect recent deployments and roll back failing releases"
        }
        MetricKind::Latency => {
            "Request latency is severe: profile slow endpoints and optimize expensive queries"
        }
        MetricKind::MemoryUsage => {
            "Memory usage is severe: scale out or raise memory limits and check for leaks"
        }
        MetricKind::CpuUsage => {
            "CPU usage is severe: scale horizontally or optimize CPU-bound work"
        }
        MetricKind::DiskUsage => "Disk usage is severe: free space or expand storage volumes",
        MetricKind::QueueDepth => {
            "Queue depth is severe: add consumers or throttle producers to drain the backlog"
        }
        MetricKind::CacheHitRate => {
            "Cache hit rate is very low: review cache keys, expiry and cache sizing"
        }
        MetricKind::NetworkLatency => {
            "Network latency is severe: check upstream links and regional routing"
        }
    }
}

fn metric_phrase(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::ErrorRate => "error rate",
        MetricKind::Latency => "request latency",
        MetricKind::MemoryUsage => "memory usage",
        MetricKind::CpuUsage => "CPU usage",
        MetricKind::DiskUsage => "disk usage",
        MetricKind::QueueDepth => "queue depth",
        MetricKind::CacheHitRate => "cache misses",
        MetricKind::NetworkLatency => "network latency",
    }
}

fn for_contributor(contributor: &Contributor) -> Option<Recommendation> {
    // A metric weighted out of the score gets no guidance
    if contributor.weight <= 0.0 {
        None
    } else if contributor.normalized >= SEVERE_THRESHOLD {
        Some(Recommendation::new(
            Severity::Urgent,
            Some(contributor.source),
            urgent_guidance(contributor.source),
        ))
    } else if contributor.normalized >= ELEVATED_THRESHOLD {
        Some(Recommendation::new(
            Severity::Warning,
            Some(contributor.source),
            format!(
                "Monitor {}: stress is elevated at {:.0}/100",
                metric_phrase(contributor.source),
                contributor.normalized
            ),
        ))
    } else {
        None
    }
}

/// Produces ordered, severity-tagged guidance for a result. Never empty.
pub fn recommendations(result: &TensionResult) -> Vec<Recommendation> {
    if result.has_no_signal() {
        return vec![Recommendation::new(
            Severity::Info,
            None,
            "No metrics were reported: verify that collectors are running",
        )];
    }

    let mut out: Vec<Recommendation> = result
        .top_contributors(MAX_CONTRIBUTORS_CONSIDERED)
        .iter()
        .filter_map(for_contributor)
        .collect();

    if result.trend == Trend::Degrading {
        out.push(Recommendation::new(
            Severity::Warning,
            None,
            "Tension is rising compared to recent history: watch for further degradation",
        ));
    }

    if out.is_empty() {
        out.push(Recommendation::new(
            Severity::Info,
            None,
            "All metrics are within normal parameters",
        ));
    }

    out.sort_by_key(|r| r.severity);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Percentage, Timestamp};

    fn contributor(source: MetricKind, normalized: f64, weight: f64) -> Contributor {
        Contributor {
            source,
            raw_value: normalized,
            normalized,
            weight,
            impact: normalized * weight,
        }
    }

    fn result(trend: Trend, mut contributors: Vec<Contributor>) -> TensionResult {
        contributors.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap());
        TensionResult {
            key: "test".to_string(),
            score: 50.0,
            trend,
            metrics_present: contributors.len(),
            contributors,
            history: vec![50.0],
            confidence: Percentage::new(80),
            metrics_expected: 8,
            analyzed_at: Timestamp::now(),
        }
    }

    #[test]
    fn calm_result_gets_single_affirmation() {
        let recs = recommendations(&result(
            Trend::Stable,
            vec![contributor(MetricKind::CpuUsage, 20.0, 0.15)],
        ));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Info);
        assert!(recs[0].message.contains("within normal parameters"));
    }

    #[test]
    fn severe_contributor_gets_urgent_guidance() {
        let recs = recommendations(&result(
            Trend::Stable,
            vec![
                contributor(MetricKind::CpuUsage, 95.0, 0.15),
                contributor(MetricKind::MemoryUsage, 30.0, 0.15),
            ],
        ));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Urgent);
        assert_eq!(recs[0].source, Some(MetricKind::CpuUsage));
        assert!(recs[0].message.contains("scale"));
    }

    #[test]
    fn elevated_contributor_gets_monitoring_guidance() {
        let recs = recommendations(&result(
            Trend::Stable,
            vec![contributor(MetricKind::QueueDepth, 60.0, 0.10)],
        ));
        assert_eq!(recs[0].severity, Severity::Warning);
        assert_eq!(recs[0].message, "Monitor queue depth: stress is elevated at 60/100");
    }

    #[test]
    fn degrading_trend_adds_warning_without_affirmation() {
        let recs = recommendations(&result(
            Trend::Degrading,
            vec![contributor(MetricKind::CpuUsage, 20.0, 0.15)],
        ));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Warning);
        assert!(recs[0].message.contains("rising"));
    }

    #[test]
    fn ordered_by_severity_then_impact() {
        let recs = recommendations(&result(
            Trend::Degrading,
            vec![
                contributor(MetricKind::MemoryUsage, 70.0, 0.15),
                contributor(MetricKind::ErrorRate, 90.0, 0.25),
                contributor(MetricKind::Latency, 85.0, 0.15),
            ],
        ));
        let severities: Vec<_> = recs.iter().map(|r| r.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Urgent, Severity::Urgent, Severity::Warning, Severity::Warning]
        );
        assert_eq!(recs[0].source, Some(MetricKind::ErrorRate));
        assert_eq!(recs[1].source, Some(MetricKind::Latency));
        assert_eq!(recs[2].source, Some(MetricKind::MemoryUsage));
        assert_eq!(recs[3].source, None);
    }

    #[test]
    fn only_top_contributors_are_considered() {
        let contributors = vec![
            contributor(MetricKind::ErrorRate, 10.0, 0.25),
            contributor(MetricKind::Latency, 10.0, 0.15),
            contributor(MetricKind::MemoryUsage, 10.0, 0.15),
            contributor(MetricKind::CpuUsage, 10.0, 0.15),
            contributor(MetricKind::QueueDepth, 10.0, 0.10),
            // Sixth by impact, so it is skipped even though it is elevated.
            contributor(MetricKind::DiskUsage, 55.0, 0.001),
        ];
        let recs = recommendations(&result(Trend::Stable, contributors));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Info);
    }

    #[test]
    fn no_signal_asks_to_verify_collectors() {
        let recs = recommendations(&result(Trend::Stable, vec![]));
        assert_eq!(recs.len(), 1);
        assert!(recs[0].message.contains("collectors"));
    }

    #[test]
    fn zero_weight_contributor_gets_no_guidance() {
        let recs = recommendations(&result(
            Trend::Stable,
            vec![
                contributor(MetricKind::DiskUsage, 99.0, 0.0),
                contributor(MetricKind::CpuUsage, 20.0, 0.15),
            ],
        ));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Info);
        assert_eq!(recs[0].source, None);
    }
}
