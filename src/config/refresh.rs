//! Refresh driver configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest interval accepted between two refreshes (one hour).
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Refresh driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshConfig {
    /// Milliseconds between two recomputations of a context
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validate refresh configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_ms == 0 || self.interval_ms > MAX_INTERVAL_MS {
            return Err(ValidationError::InvalidRefreshInterval {
                max: MAX_INTERVAL_MS,
                actual: self.interval_ms,
            });
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    5000
}
