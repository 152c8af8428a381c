// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for publishing tachometer reports to metrics backends

pub mod metrics;
pub mod tachometer;
pub mod traced;

pub use metrics::{
    Dimension, JsonLinesMetricsAdapter, LogMetricsAdapter, MetricDatum, MetricUnit, MetricsAdapter,
    MetricsError, NoOpMetricsAdapter, StatisticSet,
};
pub use tachometer::{publish_with_retry, MetricsTachometer};
pub use traced::TracedMetricsAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use metrics::{FakeMetricsAdapter, MetricsCall};
