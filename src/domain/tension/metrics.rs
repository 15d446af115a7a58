//! Raw metric bags and per-metric stress normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::settings::AnalyzerSettings;

/// The signals the analyzer knows how to weigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    ErrorRate,
    Latency,
    MemoryUsage,
    CpuUsage,
    DiskUsage,
    QueueDepth,
    CacheHitRate,
    NetworkLatency,
}

impl MetricKind {
    /// Every metric, in the order contributors tie-break on.
    pub const ALL: [MetricKind; 8] = [
        MetricKind::ErrorRate,
        MetricKind::Latency,
        MetricKind::MemoryUsage,
        MetricKind::CpuUsage,
        MetricKind::DiskUsage,
        MetricKind::QueueDepth,
        MetricKind::CacheHitRate,
        MetricKind::NetworkLatency,
    ];

    /// Name as it appears in camelCase metric payloads.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::ErrorRate => "errorRate",
            MetricKind::Latency => "latency",
            MetricKind::MemoryUsage => "memoryUsage",
            MetricKind::CpuUsage => "cpuUsage",
            MetricKind::DiskUsage => "diskUsage",
            MetricKind::QueueDepth => "queueDepth",
            MetricKind::CacheHitRate => "cacheHitRate",
            MetricKind::NetworkLatency => "networkLatency",
        }
    }

    /// Maps a raw reading to a 0-100 stress value.
    ///
    /// Fractions scale by 100, usage percentages pass through, latencies and
    /// queue depth saturate at their configured ceilings, and cache hit rate
    /// is inverted so that fewer hits mean more stress.
    pub fn normalize(&self, raw: f64, settings: &AnalyzerSettings) -> f64 {
        let stress = match self {
            MetricKind::ErrorRate => raw * 100.0,
            MetricKind::Latency => raw / settings.latency_ceiling_ms * 100.0,
            MetricKind::MemoryUsage | MetricKind::CpuUsage | MetricKind::DiskUsage => raw,
            MetricKind::QueueDepth => raw / settings.queue_ceiling * 100.0,
            MetricKind::CacheHitRate => (1.0 - raw) * 100.0,
            MetricKind::NetworkLatency => raw / settings.network_latency_ceiling_ms * 100.0,
        };
        stress.clamp(0.0, 100.0)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sparse set of runtime signals. Any subset may be absent; an absent
/// field means "no signal", never "zero stress".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBag {
    /// Fraction of failed requests, 0-1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    /// Request latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    /// Memory usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
    /// CPU usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    /// Disk usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<f64>,
    /// Pending work items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_depth: Option<f64>,
    /// Fraction of cache lookups served from cache, 0-1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_hit_rate: Option<f64>,
    /// Network round-trip latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_latency: Option<f64>,
}

impl MetricBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        *self.slot_mut(kind) = Some(value);
        self
    }

    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::ErrorRate => self.error_rate,
            MetricKind::Latency => self.latency,
            MetricKind::MemoryUsage => self.memory_usage,
            MetricKind::CpuUsage => self.cpu_usage,
            MetricKind::DiskUsage => self.disk_usage,
            MetricKind::QueueDepth => self.queue_depth,
            MetricKind::CacheHitRate => self.cache_hit_rate,
            MetricKind::NetworkLatency => self.network_latency,
        }
    }

    fn slot_mut(&mut self, kind: MetricKind) -> &mut Option<f64> {
        match kind {
            MetricKind::ErrorRate => &mut self.error_rate,
            MetricKind::Latency => &mut self.latency,
            MetricKind::MemoryUsage => &mut self.memory_usage,
            MetricKind::CpuUsage => &mut self.cpu_usage,
            MetricKind::DiskUsage => &mut self.disk_usage,
            MetricKind::QueueDepth => &mut self.queue_depth,
            MetricKind::CacheHitRate => &mut self.cache_hit_rate,
            MetricKind::NetworkLatency => &mut self.network_latency,
        }
    }

    /// Present readings in metric order, including non-finite ones.
    pub fn readings(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|v| (kind, v)))
    }

    /// Number of fields carrying a value.
    pub fn present_count(&self) -> usize {
        self.readings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}
