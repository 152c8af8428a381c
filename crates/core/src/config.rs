// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for timers and reporters
//!
//! ```toml
//! [tachometer]
//! interval = "1m"
//! capacity = 6000
//!
//! [stopwatch]
//! capacity = 10
//!
//! [metrics]
//! namespace = "edge-app"
//! metric_name = "frame_processing_time"
//! interval = "1m"
//! dimensions = { device = "cam-1" }
//!
//! [metrics.retry]
//! max_attempts = 3
//! initial_backoff = "200ms"
//! max_backoff = "5s"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

fn default_interval() -> Duration {
    Duration::from_secs(60)
}

/// Periodic reporter settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TachometerConfig {
    #[serde(with = "humantime_serde", default = "default_interval")]
    pub interval: Duration,
    /// Samples kept per report window; unlimited when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl Default for TachometerConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            capacity: None,
        }
    }
}

/// Scope timer settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopWatchConfig {
    /// Samples kept per timer; unlimited when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

/// Backoff policy for publishing to a remote backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    #[serde(default = "RetryPolicy::default_max_attempts")]
    pub max_attempts: u32,
    #[serde(with = "humantime_serde", default = "RetryPolicy::default_initial_backoff")]
    pub initial_backoff: Duration,
    #[serde(with = "humantime_serde", default = "RetryPolicy::default_max_backoff")]
    pub max_backoff: Duration,
}

impl RetryPolicy {
    fn default_max_attempts() -> u32 {
        3
    }

    fn default_initial_backoff() -> Duration {
        Duration::from_millis(200)
    }

    fn default_max_backoff() -> Duration {
        Duration::from_secs(5)
    }

    /// A single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based), doubling up to the cap
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::default_max_attempts(),
            initial_backoff: Self::default_initial_backoff(),
            max_backoff: Self::default_max_backoff(),
        }
    }
}

/// Metrics publishing settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub namespace: String,
    pub metric_name: String,
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
    #[serde(with = "humantime_serde", default = "default_interval")]
    pub interval: Duration,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl MetricsConfig {
    pub fn new(namespace: impl Into<String>, metric_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            dimensions: BTreeMap::new(),
            interval: default_interval(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The reporting cadence as tachometer settings
    pub fn tachometer(&self) -> TachometerConfig {
        TachometerConfig {
            interval: self.interval,
            capacity: None,
        }
    }
}

/// Root of a timepiece config file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimepieceConfig {
    #[serde(default)]
    pub tachometer: TachometerConfig,
    #[serde(default)]
    pub stopwatch: StopWatchConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfig>,
}

impl TimepieceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tachometer.interval.is_zero() {
            return Err(ConfigError::Invalid("tachometer.interval must be positive".into()));
        }
        if let Some(metrics) = &self.metrics {
            if metrics.interval.is_zero() {
                return Err(ConfigError::Invalid("metrics.interval must be positive".into()));
            }
            if metrics.retry.max_attempts == 0 {
                return Err(ConfigError::Invalid("metrics.retry.max_attempts must be at least 1".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
