//! Configuration error types

use thiserror::Error;

use crate::domain::tension::AnalyzerError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid analyzer settings: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Refresh interval must be between 1 and {max} ms, got {actual}")]
    InvalidRefreshInterval { max: u64, actual: u64 },

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}
