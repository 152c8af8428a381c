// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics adapter writing one JSON object per line

use super::{MetricDatum, MetricsAdapter, MetricsError};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Line<'a> {
    namespace: &'a str,
    #[serde(flatten)]
    datum: &'a MetricDatum,
}

/// Writes `{"Namespace": .., "MetricName": .., ...}` lines to a writer
pub struct JsonLinesMetricsAdapter<W> {
    writer: Arc<Mutex<W>>,
}

impl<W> Clone for JsonLinesMetricsAdapter<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<W: Write + Send + 'static> JsonLinesMetricsAdapter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }
}

impl JsonLinesMetricsAdapter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> MetricsAdapter for JsonLinesMetricsAdapter<W> {
    fn put_metric_data(&self, namespace: &str, datum: &MetricDatum) -> Result<(), MetricsError> {
        let line = serde_json::to_string(&Line { namespace, datum })
            .map_err(|e| MetricsError::Rejected(e.to_string()))?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{line}").map_err(|e| MetricsError::Io(e.to_string()))?;
        writer.flush().map_err(|e| MetricsError::Io(e.to_string()))
    }
}

#[cfg(test)]
#[path = "json_lines_tests.rs"]
mod tests;
