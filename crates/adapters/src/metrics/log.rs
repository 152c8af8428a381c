// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics adapter that emits data points as log events

use super::{MetricDatum, MetricsAdapter, MetricsError};

/// Emits every data point as an `info` tracing event
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMetricsAdapter;

impl LogMetricsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsAdapter for LogMetricsAdapter {
    fn put_metric_data(&self, namespace: &str, datum: &MetricDatum) -> Result<(), MetricsError> {
        let stats = &datum.statistic_values;
        tracing::info!(
            namespace,
            metric = %datum.metric_name,
            timestamp = %datum.timestamp,
            samples = stats.sample_count,
            sum = stats.sum,
            min = stats.minimum,
            max = stats.maximum,
            "metric"
        );
        Ok(())
    }
}
