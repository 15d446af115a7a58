//! Tension Module - Aggregation of runtime signals into a stress score.
//!
//! # Components
//!
//! - `MetricBag` - Sparse input signals and their normalization curves
//! - `TensionAnalyzer` - Weighted aggregation, bounded history, trend, confidence
//! - `describe` - Fixed text for each band/trend pair
//! - `recommendations` - Severity-tagged remediation guidance
//!
//! Missing metrics are never errors. They are left out of the weighted
//! mean and lower the reported confidence.

mod analyzer;
mod description;
mod history;
mod metrics;
mod recommendations;
mod settings;

pub use analyzer::{Contributor, TensionAnalyzer, TensionResult, Trend, MAX_SCORE, MIN_SCORE};
pub use description::describe;
pub use history::ScoreHistory;
pub use metrics::{MetricBag, MetricKind};
pub use recommendations::{
    recommendations, Recommendation, Severity, ELEVATED_THRESHOLD, SEVERE_THRESHOLD,
};
pub use settings::{AnalyzerError, AnalyzerSettings, MetricWeights};
