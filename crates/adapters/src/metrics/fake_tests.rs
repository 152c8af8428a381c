// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tp_core::{MetricsConfig, Report, Statistics};

fn datum() -> MetricDatum {
    let report = Report {
        timestamp: Utc::now(),
        statistics: Statistics {
            count: 1,
            min: 0.1,
            max: 0.1,
            mean: 0.1,
            sum: 0.1,
        },
    };
    MetricDatum::from_report(&MetricsConfig::new("ns", "m"), &report)
}

#[test]
fn fake_metrics_records_calls() {
    let adapter = FakeMetricsAdapter::new();
    adapter.put_metric_data("ns", &datum()).unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].namespace, "ns");
    assert_eq!(calls[0].datum.metric_name, "m");
}

#[test]
fn fake_metrics_returns_queued_failures_in_order() {
    let adapter = FakeMetricsAdapter::new();
    adapter.fail_next(MetricsError::Unavailable("first".into()));
    adapter.fail_next(MetricsError::Rejected("second".into()));

    assert_eq!(
        adapter.put_metric_data("ns", &datum()),
        Err(MetricsError::Unavailable("first".into()))
    );
    assert_eq!(
        adapter.put_metric_data("ns", &datum()),
        Err(MetricsError::Rejected("second".into()))
    );
    assert!(adapter.put_metric_data("ns", &datum()).is_ok());
    assert_eq!(adapter.attempts(), 3);
    assert_eq!(adapter.calls().len(), 1);
}
