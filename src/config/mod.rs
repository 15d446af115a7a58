//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TENSION_ENGINE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tension_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Refreshing every {:?}", config.refresh.interval());
//! ```

mod error;
mod refresh;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use refresh::{RefreshConfig, MAX_INTERVAL_MS};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::tension::AnalyzerSettings;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TENSION_ENGINE";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scoring settings (history, trend detection, ceilings, weights)
    #[serde(default)]
    pub analyzer: AnalyzerSettings,

    /// Refresh driver settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TENSION_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TENSION_ENGINE__ANALYZER__HISTORY_CAPACITY=50` -> `analyzer.history_capacity = 50`
    /// - `TENSION_ENGINE__ANALYZER__WEIGHTS__CPU_USAGE=0.3` -> `analyzer.weights.cpu_usage = 0.3`
    /// - `TENSION_ENGINE__REFRESH__INTERVAL_MS=1000` -> `refresh.interval_ms = 1000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from an optional file, with environment variables
    /// taking precedence over the file.
    ///
    /// The file format follows the extension (`.toml`, `.json`, ...). A
    /// missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analyzer.validate()?;
        self.refresh.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}
