//! # Configuration
//!
//! The dashboard reads a TOML document with three tables:
//!
//! ```toml
//! [fetch]
//! endpoint = "http://localhost:8080/orders"
//! timeout_secs = 10
//!
//! [metrics]
//! profit_margin = 35
//! growth_rate = 12
//!
//! [controller]
//! refresh_policy = "supersede"
//! keep_stale_on_failure = true
//! buffer_size = 32
//! ```
//!
//! Sources, later ones winning:
//! 1. The embedded default above
//! 2. A file passed to [`DashboardConfig::load`]
//! 3. `DASHBOARD_ENDPOINT`, `DASHBOARD_PROFIT_MARGIN`, `DASHBOARD_GROWTH_RATE`

use crate::model::MetricsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG: &str = r#"
[fetch]
endpoint = "http://localhost:8080/orders"
timeout_secs = 10

[metrics]
profit_margin = 35
growth_rate = 12

[controller]
refresh_policy = "supersede"
keep_stale_on_failure = true
buffer_size = 32
"#;

pub const ENV_ENDPOINT: &str = "DASHBOARD_ENDPOINT";
pub const ENV_PROFIT_MARGIN: &str = "DASHBOARD_PROFIT_MARGIN";
pub const ENV_GROWTH_RATE: &str = "DASHBOARD_GROWTH_RATE";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub fetch: FetchConfig,
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
}

/// Where and how to fetch orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// What the controller does with a refresh that arrives while a fetch is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Abort the fetch in flight and start a new one.
    #[default]
    Supersede,
    /// Drop the request and keep waiting for the fetch already in flight.
    IgnoreWhileLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub refresh_policy: RefreshPolicy,
    /// Keep the last good bundle visible, marked stale, after a failed refresh.
    #[serde(default = "default_keep_stale")]
    pub keep_stale_on_failure: bool,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_keep_stale() -> bool {
    true
}

fn default_buffer_size() -> usize {
    32
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            refresh_policy: RefreshPolicy::default(),
            keep_stale_on_failure: default_keep_stale(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                endpoint: "http://localhost:8080/orders".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            metrics: MetricsConfig::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from `path`, or the embedded default when `None`,
    /// then applies environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&contents)?
            }
            None => {
                info!("Using default embedded configuration");
                Self::from_toml_str(DEFAULT_CONFIG)?
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.fetch.endpoint = endpoint;
        }
        if let Some(value) = lookup(ENV_PROFIT_MARGIN) {
            self.metrics.profit_margin = parse_percent(ENV_PROFIT_MARGIN, &value)?;
        }
        if let Some(value) = lookup(ENV_GROWTH_RATE) {
            self.metrics.growth_rate = parse_percent(ENV_GROWTH_RATE, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("fetch.endpoint must not be empty".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be positive".into()));
        }
        if self.metrics.profit_margin > 100 {
            return Err(ConfigError::Invalid(format!(
                "metrics.profit_margin must be within 0..=100, got {}",
                self.metrics.profit_margin
            )));
        }
        if self.metrics.growth_rate > 100 {
            return Err(ConfigError::Invalid(format!(
                "metrics.growth_rate must be within 0..=100, got {}",
                self.metrics.growth_rate
            )));
        }
        if self.controller.buffer_size == 0 {
            return Err(ConfigError::Invalid("controller.buffer_size must be positive".into()));
        }
        Ok(())
    }
}

fn parse_percent(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{key}={value:?} is not a percentage: {e}")))
}
