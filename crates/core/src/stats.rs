// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sliding window of durations and the statistics derived from it
//!
//! All values are reported in seconds.

use crate::error::TimingError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Render at most this many intervals in `Display` output
pub const MAX_RENDERED_INTERVALS: usize = 5;

/// Summary of a window of durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sum: f64,
}

impl Statistics {
    /// Mean event frequency in Hertz, zero when the mean interval is zero
    pub fn frequency(&self) -> f64 {
        if self.mean > 0.0 {
            1.0 / self.mean
        } else {
            0.0
        }
    }
}

/// Bounded FIFO history of durations
///
/// Statistics are always computed from the samples currently held, so they
/// cannot drift from the window contents.
#[derive(Debug, Clone, Default)]
pub struct IntervalWindow {
    samples: VecDeque<Duration>,
    capacity: Option<usize>,
}

impl IntervalWindow {
    /// Create a window; `None` keeps every sample
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a sample, evicting the oldest ones beyond capacity
    pub fn push(&mut self, sample: Duration) {
        if self.capacity == Some(0) {
            return;
        }
        self.samples.push_back(sample);
        if let Some(capacity) = self.capacity {
            while self.samples.len() > capacity {
                self.samples.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Duration> + '_ {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<Duration> {
        self.samples.iter().copied().collect()
    }

    pub fn sum(&self) -> Duration {
        self.samples.iter().sum()
    }

    pub fn statistics(&self) -> Result<Statistics, TimingError> {
        statistics_of(self.samples.iter().copied())
    }

    /// Take the current statistics and empty the window
    pub fn drain(&mut self) -> Result<Statistics, TimingError> {
        let statistics = self.statistics()?;
        self.samples.clear();
        Ok(statistics)
    }

    /// Writes ` intervals=[..] min=.. mean=.. max=..`, or nothing when empty
    pub(crate) fn fmt_props(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(stats) = self.statistics() else {
            return Ok(());
        };
        let mut rendered: Vec<String> = self
            .samples
            .iter()
            .take(MAX_RENDERED_INTERVALS)
            .map(|d| format!("{:.4}", d.as_secs_f64()))
            .collect();
        if self.samples.len() > MAX_RENDERED_INTERVALS {
            rendered.push("...".to_string());
        }
        write!(
            f,
            " intervals=[{}] min={:.4} mean={:.4} max={:.4}",
            rendered.join(", "),
            stats.min,
            stats.mean,
            stats.max
        )
    }
}

/// Compute statistics over any sequence of durations
pub fn statistics_of(samples: impl IntoIterator<Item = Duration>) -> Result<Statistics, TimingError> {
    let mut count = 0usize;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = 0.0f64;
    for sample in samples {
        let secs = sample.as_secs_f64();
        count += 1;
        sum += secs;
        min = min.min(secs);
        max = max.max(secs);
    }
    if count == 0 {
        return Err(TimingError::EmptyAccumulator);
    }
    // Rounding can push the mean a hair outside [min, max] for equal samples
    let mean = (sum / count as f64).clamp(min, max);
    Ok(Statistics {
        count,
        min,
        max,
        mean,
        sum,
    })
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
