//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ids::{CounterIdGenerator, IdGenerator, RandomIdGenerator};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Identifier generation settings.
    #[serde(default)]
    pub ids: IdsConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ),
            });
        }
        if self.ids.strategy == IdStrategy::Random && self.ids.counter_start != 0 {
            return Err(ConfigError::ValidationError {
                message: "ids.counter_start only applies to the 'counter' strategy".to_string(),
            });
        }
        Ok(())
    }
}

/// How missing element identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// UUID v4 suffixes.
    #[default]
    Random,
    /// Sequential numeric suffixes.
    Counter,
}

/// Identifier generation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdsConfig {
    /// Generation strategy: "random" or "counter".
    /// Default: "random"
    #[serde(default)]
    pub strategy: IdStrategy,

    /// First suffix produced by the "counter" strategy.
    #[serde(default)]
    pub counter_start: u64,
}

impl IdsConfig {
    /// Builds the configured generator.
    #[must_use]
    pub fn build_generator(&self) -> Arc<dyn IdGenerator> {
        match self.strategy {
            IdStrategy::Random => Arc::new(RandomIdGenerator::new()),
            IdStrategy::Counter => Arc::new(CounterIdGenerator::starting_at(self.counter_start)),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print emitted JSON.
    #[serde(default)]
    pub pretty: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
