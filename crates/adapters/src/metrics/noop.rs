// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op metrics adapter for when publishing is disabled.

use super::{MetricDatum, MetricsAdapter, MetricsError};

/// Metrics adapter that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMetricsAdapter;

impl NoOpMetricsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsAdapter for NoOpMetricsAdapter {
    fn put_metric_data(&self, _namespace: &str, _datum: &MetricDatum) -> Result<(), MetricsError> {
        Ok(())
    }
}
