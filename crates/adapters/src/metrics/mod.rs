// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics backend adapters
//!
//! A [`MetricDatum`] carries one report window as a statistic set in the
//! shape metrics services accept (sample count, sum, minimum, maximum).

mod json_lines;
mod log;
mod noop;

pub use json_lines::JsonLinesMetricsAdapter;
pub use log::LogMetricsAdapter;
pub use noop::NoOpMetricsAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMetricsAdapter, MetricsCall};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tp_core::{MetricsConfig, Report};

/// Errors from metrics operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("metrics backend unavailable: {0}")]
    Unavailable(String),
    #[error("metrics backend rejected data: {0}")]
    Rejected(String),
    #[error("metrics write failed: {0}")]
    Io(String),
}

impl MetricsError {
    /// Whether a later attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, MetricsError::Rejected(_))
    }
}

/// Unit of the published values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    Seconds,
}

/// Name/value pair qualifying a metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Pre-aggregated values of one report window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticSet {
    pub sample_count: usize,
    pub sum: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// One metric data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDatum {
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    pub timestamp: DateTime<Utc>,
    pub statistic_values: StatisticSet,
    pub unit: MetricUnit,
}

impl MetricDatum {
    pub fn from_report(config: &MetricsConfig, report: &Report) -> Self {
        let stats = report.statistics;
        Self {
            metric_name: config.metric_name.clone(),
            dimensions: config
                .dimensions
                .iter()
                .map(|(name, value)| Dimension {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            timestamp: report.timestamp,
            statistic_values: StatisticSet {
                sample_count: stats.count,
                sum: stats.sum,
                minimum: stats.min,
                maximum: stats.max,
            },
            unit: MetricUnit::Seconds,
        }
    }
}

/// Adapter for publishing metric data
///
/// Called from whichever thread runs the report callback, possibly an
/// executor worker, so implementations may block.
pub trait MetricsAdapter: Clone + Send + Sync + 'static {
    fn put_metric_data(&self, namespace: &str, datum: &MetricDatum) -> Result<(), MetricsError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
