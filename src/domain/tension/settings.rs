//! Analyzer settings: history sizing, trend detection, saturation ceilings
//! and per-metric weights.

use serde::Deserialize;
use thiserror::Error;

use super::metrics::MetricKind;

/// Errors raised when analyzer settings cannot produce a bounded score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzerError {
    #[error("History capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("Trend window must be at least 1")]
    ZeroTrendWindow,

    #[error("Trend threshold must be a finite, non-negative number, got {0}")]
    InvalidTrendThreshold(f64),

    #[error("Weight for '{metric}' must be a finite, non-negative number, got {value}")]
    InvalidWeight { metric: MetricKind, value: f64 },

    #[error("At least one metric weight must be positive")]
    ZeroTotalWeight,

    #[error("Ceiling '{name}' must be a finite, positive number, got {value}")]
    InvalidCeiling { name: &'static str, value: f64 },
}

/// Relative importance of each metric in the aggregate score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricWeights {
    #[serde(default = "default_error_rate_weight")]
    pub error_rate: f64,
    #[serde(default = "default_latency_weight")]
    pub latency: f64,
    #[serde(default = "default_memory_weight")]
    pub memory_usage: f64,
    #[serde(default = "default_cpu_weight")]
    pub cpu_usage: f64,
    #[serde(default = "default_disk_weight")]
    pub disk_usage: f64,
    #[serde(default = "default_queue_weight")]
    pub queue_depth: f64,
    #[serde(default = "default_cache_weight")]
    pub cache_hit_rate: f64,
    #[serde(default = "default_network_weight")]
    pub network_latency: f64,
}

impl MetricWeights {
    pub fn get(&self, kind: MetricKind) -> f64 {
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

    fn validate(&self) -> Result<(), AnalyzerError> {
        let mut total = 0.0;
        for kind in MetricKind::ALL {
            let value = self.get(kind);
            if !value.is_finite() || value < 0.0 {
                return Err(AnalyzerError::InvalidWeight {
                    metric: kind,
                    value,
                });
            }
            total += value;
        }
        if total <= 0.0 {
            return Err(AnalyzerError::ZeroTotalWeight);
        }
        Ok(())
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            error_rate: default_error_rate_weight(),
            latency: default_latency_weight(),
            memory_usage: default_memory_weight(),
            cpu_usage: default_cpu_weight(),
            disk_usage: default_disk_weight(),
            queue_depth: default_queue_weight(),
            cache_hit_rate: default_cache_weight(),
            network_latency: default_network_weight(),
        }
    }
}

fn default_error_rate_weight() -> f64 {
    0.25
}

fn default_latency_weight() -> f64 {
    0.15
}

fn default_memory_weight() -> f64 {
    0.15
}

fn default_cpu_weight() -> f64 {
    0.15
}

fn default_disk_weight() -> f64 {
    0.05
}

fn default_queue_weight() -> f64 {
    0.10
}

fn default_cache_weight() -> f64 {
    0.10
}

fn default_network_weight() -> f64 {
    0.05
}

/// Analyzer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzerSettings {
    /// Scores retained per analysis key.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Number of preceding scores averaged for trend detection.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Points the new score must move past the rolling average to count
    /// as a trend.
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    /// Queue depth that maps to full stress.
    #[serde(default = "default_queue_ceiling")]
    pub queue_ceiling: f64,

    /// Request latency (ms) that maps to full stress.
    #[serde(default = "default_latency_ceiling_ms")]
    pub latency_ceiling_ms: f64,

    /// Network latency (ms) that maps to full stress.
    #[serde(default = "default_network_latency_ceiling_ms")]
    pub network_latency_ceiling_ms: f64,

    #[serde(default)]
    pub weights: MetricWeights,
}

impl AnalyzerSettings {
    /// Checks every setting; the analyzer refuses to start on failure.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.history_capacity == 0 {
            return Err(AnalyzerError::ZeroHistoryCapacity);
        }
        if self.trend_window == 0 {
            return Err(AnalyzerError::ZeroTrendWindow);
        }
        if !self.trend_threshold.is_finite() || self.trend_threshold < 0.0 {
            return Err(AnalyzerError::InvalidTrendThreshold(self.trend_threshold));
        }
        for (name, value) in [
            ("queue_ceiling", self.queue_ceiling),
            ("latency_ceiling_ms", self.latency_ceiling_ms),
            ("network_latency_ceiling_ms", self.network_latency_ceiling_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalyzerError::InvalidCeiling { name, value });
            }
        }
        self.weights.validate()
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    pub fn with_trend_threshold(mut self, threshold: f64) -> Self {
        self.trend_threshold = threshold;
        self
    }
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            trend_window: default_trend_window(),
            trend_threshold: default_trend_threshold(),
            queue_ceiling: default_queue_ceiling(),
            latency_ceiling_ms: default_latency_ceiling_ms(),
            network_latency_ceiling_ms: default_network_latency_ceiling_ms(),
            weights: MetricWeights::default(),
        }
    }
}

fn default_history_capacity() -> usize {
    20
}

fn default_trend_window() -> usize {
    5
}

fn default_trend_threshold() -> f64 {
    5.0
}

fn default_queue_ceiling() -> f64 {
    100.0
}

fn default_latency_ceiling_ms() -> f64 {
    1000.0
}

fn default_network_latency_ceiling_ms() -> f64 {
    500.0
}
