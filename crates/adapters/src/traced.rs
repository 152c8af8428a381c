// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::metrics::{MetricDatum, MetricsAdapter, MetricsError};

/// Wrapper that adds tracing to any MetricsAdapter
#[derive(Clone)]
pub struct TracedMetricsAdapter<M> {
    inner: M,
}

impl<M> TracedMetricsAdapter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: MetricsAdapter> MetricsAdapter for TracedMetricsAdapter<M> {
    fn put_metric_data(&self, namespace: &str, datum: &MetricDatum) -> Result<(), MetricsError> {
        let span = tracing::info_span!("metrics.put", namespace, metric = %datum.metric_name);
        let _guard = span.enter();

        tracing::debug!(samples = datum.statistic_values.sample_count, "publishing");

        // Precondition: an empty window should never be published
        if datum.statistic_values.sample_count == 0 {
            tracing::error!("refusing to publish empty statistic set");
            return Err(MetricsError::Rejected(format!(
                "empty statistic set for {}",
                datum.metric_name
            )));
        }

        let start = std::time::Instant::now();
        let result = self.inner.put_metric_data(namespace, datum);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "published"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "publish failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
