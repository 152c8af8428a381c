// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake metrics adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MetricDatum, MetricsAdapter, MetricsError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded metrics publication
#[derive(Debug, Clone)]
pub struct MetricsCall {
    pub namespace: String,
    pub datum: MetricDatum,
}

/// Fake metrics adapter for testing
///
/// Records every successful call. Queued failures are returned, in order,
/// by the next calls.
#[derive(Clone, Default)]
pub struct FakeMetricsAdapter {
    calls: Arc<Mutex<Vec<MetricsCall>>>,
    failures: Arc<Mutex<VecDeque<MetricsError>>>,
    attempts: Arc<Mutex<usize>>,
}

impl FakeMetricsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: MetricsError) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(error);
    }

    /// Get all recorded publications
    pub fn calls(&self) -> Vec<MetricsCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of calls, failed ones included
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MetricsAdapter for FakeMetricsAdapter {
    fn put_metric_data(&self, namespace: &str, datum: &MetricDatum) -> Result<(), MetricsError> {
        *self.attempts.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if let Some(error) = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            return Err(error);
        }
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MetricsCall {
                namespace: namespace.to_string(),
                datum: datum.clone(),
            });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
