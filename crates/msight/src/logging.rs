//! Log subscriber setup for the binary.

use msight_error::{ConfigError, MsightResult};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log lines are filtered and formatted.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives (e.g., "info", "msight_pipeline=debug")
    pub log_level: String,
    /// Emit one JSON object per line
    pub json_logs: bool,
}

impl LoggingConfig {
    /// Filter from `RUST_LOG`, falling back to `info`.
    pub fn new() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
        }
    }

    /// Force `debug` regardless of `RUST_LOG`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Parse the filter directives.
    pub fn filter(&self) -> MsightResult<EnvFilter> {
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            ConfigError::new(format!("Invalid log filter '{}': {}", self.log_level, e)).into()
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// `ConfigError` for malformed filter directives or if a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> MsightResult<()> {
    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install log subscriber: {}", e)))?;

    Ok(())
}
