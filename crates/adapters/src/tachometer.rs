// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MetricsTachometer - a tachometer publishing its reports as metrics
//!
//! Each report becomes one [`MetricDatum`] in unit seconds. Inline
//! publishing makes a single attempt so the polling thread never sleeps.
//! With an executor, transient failures are retried with exponential
//! backoff on the executor's thread.

use crate::metrics::{MetricDatum, MetricsAdapter, MetricsError};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tp_core::{
    CallbackError, Clock, Executor, MetricsConfig, Report, RetryPolicy, Tachometer, TachometerError,
};

/// Publish `datum`, retrying transient failures per `policy`.
///
/// Sleeps on the calling thread between attempts. Returns the last error
/// once attempts run out or on a non-retryable error.
pub fn publish_with_retry<M: MetricsAdapter>(
    adapter: &M,
    namespace: &str,
    datum: &MetricDatum,
    policy: &RetryPolicy,
) -> Result<(), MetricsError> {
    let mut attempt = 1;
    loop {
        match adapter.put_metric_data(namespace, datum) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let delay = policy.backoff(attempt);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying publish");
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Tachometer whose reports are published through a [`MetricsAdapter`]
#[derive(Debug)]
pub struct MetricsTachometer {
    inner: Tachometer,
    offloaded: Arc<AtomicBool>,
}

impl MetricsTachometer {
    pub fn new<M: MetricsAdapter>(config: MetricsConfig, adapter: M, start: Instant) -> Self {
        let id = format!("{}.{}", config.namespace, config.metric_name);
        let tachometer_config = config.tachometer();
        let offloaded = Arc::new(AtomicBool::new(false));
        let inline_policy = RetryPolicy::none();
        let inner = Tachometer::from_config(&tachometer_config, start, {
            let offloaded = Arc::clone(&offloaded);
            move |report: Report| {
                let policy = if offloaded.load(Ordering::SeqCst) {
                    &config.retry
                } else {
                    &inline_policy
                };
                let datum = MetricDatum::from_report(&config, &report);
                publish_with_retry(&adapter, &config.namespace, &datum, policy).map_err(|e| {
                    tracing::warn!(
                        namespace = %config.namespace,
                        metric = %config.metric_name,
                        error = %e,
                        "couldn't put metric data"
                    );
                    CallbackError::new(e.to_string())
                })
            }
        })
        .with_id(id);
        Self { inner, offloaded }
    }

    /// Publish from `executor`, retrying per the configured policy
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.inner = self.inner.with_executor(executor);
        self.offloaded.store(true, Ordering::SeqCst);
        self
    }

    pub fn tachometer(&self) -> &Tachometer {
        &self.inner
    }

    /// Record a frame at `now` and publish if the interval has elapsed
    pub fn tick(&mut self, now: Instant, timestamp: DateTime<Utc>) -> Result<bool, TachometerError> {
        self.inner.tick(now, timestamp)
    }

    /// Tick at the clock's current time
    pub fn poll(&mut self, clock: &impl Clock) -> Result<bool, TachometerError> {
        self.inner.poll(clock)
    }
}

#[cfg(test)]
#[path = "tachometer_tests.rs"]
mod tests;
