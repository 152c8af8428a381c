// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticker - measures the interval between recurring events
//!
//! ```text
//! <Ticker intervals=[0.0899, 0.0632, 0.0543, 0.0713, 0.0681] min=0.0543 mean=0.0694 max=0.0899>
//! ```

use crate::clock::Clock;
use crate::error::TimingError;
use crate::stats::{IntervalWindow, Statistics};
use std::fmt;
use std::time::{Duration, Instant};

/// Records the time between successive events in a sliding window
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    window: IntervalWindow,
    last_event: Option<Instant>,
}

impl Ticker {
    /// Ticker keeping every interval
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticker keeping only the most recent `capacity` intervals
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            window: IntervalWindow::new(Some(capacity)),
            last_event: None,
        }
    }

    /// Ticker whose first interval is measured from `baseline`
    pub fn starting_at(baseline: Instant, capacity: Option<usize>) -> Self {
        Self {
            window: IntervalWindow::new(capacity),
            last_event: Some(baseline),
        }
    }

    /// Record an event at `now`.
    ///
    /// Returns the interval since the previous event, or `None` for the first
    /// event, which only sets the baseline.
    pub fn record_event(&mut self, now: Instant) -> Result<Option<Duration>, TimingError> {
        let Some(last) = self.last_event else {
            self.last_event = Some(now);
            return Ok(None);
        };
        let interval = now
            .checked_duration_since(last)
            .ok_or_else(|| TimingError::NonMonotonicTimestamp {
                behind: last.duration_since(now),
            })?;
        self.window.push(interval);
        self.last_event = Some(now);
        Ok(Some(interval))
    }

    /// Record an event at the clock's current time
    pub fn record_event_now(&mut self, clock: &impl Clock) -> Result<Option<Duration>, TimingError> {
        self.record_event(clock.now())
    }

    pub fn statistics(&self) -> Result<Statistics, TimingError> {
        self.window.statistics()
    }

    /// Recorded intervals from oldest to newest
    pub fn intervals(&self) -> Vec<Duration> {
        self.window.to_vec()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.window.capacity()
    }

    pub fn last_event(&self) -> Option<Instant> {
        self.last_event
    }

    /// Forget the recorded intervals but keep the baseline
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub(crate) fn window_mut(&mut self) -> &mut IntervalWindow {
        &mut self.window
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Ticker")?;
        self.window.fmt_props(f)?;
        write!(f, ">")
    }
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
