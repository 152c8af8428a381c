// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tp_core::{MetricsConfig, Report, Statistics};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn datum(count: usize) -> MetricDatum {
    let report = Report {
        timestamp: Utc::now(),
        statistics: Statistics {
            count,
            min: 0.5,
            max: 0.5,
            mean: 0.5,
            sum: 0.5 * count as f64,
        },
    };
    MetricDatum::from_report(&MetricsConfig::new("ns", "frame_time"), &report)
}

#[test]
fn writes_one_json_object_per_datum() {
    let buffer = Buffer::default();
    let adapter = JsonLinesMetricsAdapter::new(buffer.clone());

    adapter.put_metric_data("ns", &datum(1)).unwrap();
    adapter.clone().put_metric_data("ns", &datum(2)).unwrap();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["Namespace"], "ns");
    assert_eq!(lines[0]["MetricName"], "frame_time");
    assert_eq!(lines[1]["StatisticValues"]["SampleCount"], 2);
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_is_retryable_io_error() {
    let adapter = JsonLinesMetricsAdapter::new(BrokenPipe);
    let err = adapter.put_metric_data("ns", &datum(1)).unwrap_err();
    assert!(matches!(err, MetricsError::Io(_)));
    assert!(err.is_retryable());
}
