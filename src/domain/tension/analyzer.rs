//! Tension Analyzer - Aggregates runtime signals into a bounded stress score.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::history::ScoreHistory;
use super::metrics::{MetricBag, MetricKind};
use super::settings::{AnalyzerError, AnalyzerSettings};
use crate::domain::foundation::{Percentage, Timestamp};

/// Lowest score the analyzer ever reports.
pub const MIN_SCORE: f64 = 0.0;

/// Highest score the analyzer ever reports.
pub const MAX_SCORE: f64 = 100.0;

/// Standard deviation (in points) at which stability bottoms out.
const VOLATILITY_CAP: f64 = 50.0;

/// Short-term direction of tension relative to recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Degrading => "degrading",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One metric's share of the aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub source: MetricKind,
    pub raw_value: f64,
    /// Stress on the 0-100 scale.
    pub normalized: f64,
    pub weight: f64,
    /// `normalized * weight`.
    pub impact: f64,
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionResult {
    pub key: String,
    /// Always within `[0, 100]`.
    pub score: f64,
    pub trend: Trend,
    /// Sorted by descending impact.
    pub contributors: Vec<Contributor>,
    /// Scores for this key, oldest first, including this one when it was
    /// backed by signal.
    pub history: Vec<f64>,
    pub confidence: Percentage,
    pub metrics_present: usize,
    pub metrics_expected: usize,
    pub analyzed_at: Timestamp,
}

impl TensionResult {
    /// The `n` highest-impact contributors.
    pub fn top_contributors(&self, n: usize) -> &[Contributor] {
        &self.contributors[..n.min(self.contributors.len())]
    }

    /// True when no usable metric reached the analyzer.
    pub fn has_no_signal(&self) -> bool {
        self.metrics_present == 0
    }
}

/// Stateful analyzer holding a bounded score history per analysis key.
#[derive(Debug, Clone)]
pub struct TensionAnalyzer {
    settings: AnalyzerSettings,
    histories: HashMap<String, ScoreHistory>,
}

impl TensionAnalyzer {
    /// Creates an analyzer after validating its settings.
    pub fn new(settings: AnalyzerSettings) -> Result<Self, AnalyzerError> {
        settings.validate()?;
        Ok(Self {
            settings,
            histories: HashMap::new(),
        })
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Scores a metric bag and records the score in the key's history.
    ///
    /// Absent, non-finite and zero-weight metrics are left out of both the
    /// weighted sum and the weight total; they lower confidence instead. A
    /// bag with no weighted signal repeats the key's last score (or 0) as
    /// `Stable` at zero confidence and leaves the history untouched.
    pub fn analyze(&mut self, key: &str, metrics: &MetricBag) -> TensionResult {
        let contributors = self.contributors(key, metrics);

        let total_weight: f64 = contributors.iter().map(|c| c.weight).sum();
        let total_impact: f64 = contributors.iter().map(|c| c.impact).sum();

        let capacity = self.settings.history_capacity;
        let history = self
            .histories
            .entry(key.to_string())
            .or_insert_with(|| ScoreHistory::new(capacity));

        let metrics_expected = MetricKind::ALL.len();

        if contributors.is_empty() || total_weight <= 0.0 {
            let score = history.last().unwrap_or(MIN_SCORE);
            debug!(key, score, "No weighted signal, repeating last score");
            return TensionResult {
                key: key.to_string(),
                score,
                trend: Trend::Stable,
                contributors: Vec::new(),
                history: history.to_vec(),
                confidence: Percentage::ZERO,
                metrics_present: 0,
                metrics_expected,
                analyzed_at: Timestamp::now(),
            };
        }

        let score = (total_impact / total_weight).clamp(MIN_SCORE, MAX_SCORE);

        let trend = match history.recent_mean(self.settings.trend_window) {
            None => Trend::Stable,
            Some(mean) => {
                let delta = score - mean;
                if delta > self.settings.trend_threshold {
                    Trend::Degrading
                } else if delta < -self.settings.trend_threshold {
                    Trend::Improving
                } else {
                    Trend::Stable
                }
            }
        };

        history.push(score);

        let metrics_present = contributors.len();
        let coverage = metrics_present as f64 / metrics_expected as f64;
        let volatility = history
            .recent_std_dev(self.settings.trend_window)
            .min(VOLATILITY_CAP);
        let stability = 1.0 - volatility / 100.0;
        let confidence = Percentage::from_fraction(coverage * stability);

        debug!(
            key,
            score,
            trend = %trend,
            confidence = confidence.value(),
            metrics_present,
            "Analyzed tension"
        );

        TensionResult {
            key: key.to_string(),
            score,
            trend,
            contributors,
            history: history.to_vec(),
            confidence,
            metrics_present,
            metrics_expected,
            analyzed_at: Timestamp::now(),
        }
    }

    fn contributors(&self, key: &str, metrics: &MetricBag) -> Vec<Contributor> {
        let mut contributors: Vec<Contributor> = metrics
            .readings()
            .filter(|(kind, raw)| {
                if raw.is_finite() {
                    true
                } else {
                    warn!(key, metric = %kind, "Ignoring non-finite metric reading");
                    false
                }
            })
            .filter(|(kind, _)| self.settings.weights.get(*kind) > 0.0)
            .map(|(kind, raw_value)| {
                let normalized = kind.normalize(raw_value, &self.settings);
                let weight = self.settings.weights.get(kind);
                Contributor {
                    source: kind,
                    raw_value,
                    normalized,
                    weight,
                    impact: normalized * weight,
                }
            })
            .collect();

        // Stable sort keeps metric order among equal impacts.
        contributors.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));
        contributors
    }

    /// Snapshot of a key's history, oldest first.
    pub fn history(&self, key: &str) -> Vec<f64> {
        self.histories
            .get(key)
            .map(ScoreHistory::to_vec)
            .unwrap_or_default()
    }

    /// Forgets a key's history.
    pub fn reset(&mut self, key: &str) {
        self.histories.remove(key);
    }
}
