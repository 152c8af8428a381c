// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tachometers - periodic statistics reports
//!
//! A tachometer accumulates samples and, on a fixed interval, hands a
//! [`Report`] of everything recorded since the previous report to a callback.
//! The window is drained at every report boundary so consecutive reports
//! never share samples.
//!
//! - [`Tachometer`] samples the time between its own ticks (e.g. frame time)
//! - [`DurationTachometer`] samples the duration of measured regions

use crate::clock::Clock;
use crate::config::TachometerConfig;
use crate::error::{CallbackError, ScheduleError, TachometerError, TimingError};
use crate::executor::{Dispatcher, Executor};
use crate::schedule::{IntervalTrigger, ScheduleId};
use crate::stats::{IntervalWindow, Statistics};
use crate::ticker::Ticker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Statistics snapshot handed to the report callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Wall-clock time of the report
    pub timestamp: DateTime<Utc>,
    pub statistics: Statistics,
}

/// Callback receiving each report
pub type ReportCallback = Arc<dyn Fn(Report) -> Result<(), CallbackError> + Send + Sync>;

/// Interval trigger plus report dispatch shared by the tachometers
struct Reporter {
    id: ScheduleId,
    trigger: IntervalTrigger,
    callback: ReportCallback,
    dispatcher: Dispatcher,
}

impl Reporter {
    fn new(id: ScheduleId, interval: Duration, start: Instant, callback: ReportCallback) -> Self {
        Self {
            id,
            trigger: IntervalTrigger::new(interval, start),
            callback,
            dispatcher: Dispatcher::inline(),
        }
    }

    /// Poll the trigger; on fire drain `window` and dispatch the report
    fn poll(
        &mut self,
        now: Instant,
        timestamp: DateTime<Utc>,
        window: &mut IntervalWindow,
    ) -> Result<bool, ScheduleError> {
        if !self.trigger.poll(now) {
            return Ok(false);
        }
        let statistics = match window.drain() {
            Ok(statistics) => statistics,
            Err(TimingError::EmptyAccumulator) => {
                tracing::debug!(tachometer = %self.id, "no samples in window, skipping report");
                return Ok(false);
            }
            Err(e) => {
                tracing::warn!(tachometer = %self.id, error = %e, "could not compute report");
                return Ok(false);
            }
        };
        tracing::debug!(
            tachometer = %self.id,
            count = statistics.count,
            mean = statistics.mean,
            "reporting"
        );
        let report = Report {
            timestamp,
            statistics,
        };
        let callback = Arc::clone(&self.callback);
        self.dispatcher
            .dispatch(&self.id, Box::new(move || callback(report)))?;
        Ok(true)
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Reports statistics about the time between its ticks
///
/// Call [`Tachometer::tick`] once per recurring event, e.g. once per
/// processed frame.
#[derive(Debug)]
pub struct Tachometer {
    ticker: Ticker,
    reporter: Reporter,
}

impl Tachometer {
    /// Report every `interval`, counting ticks from `start`.
    ///
    /// The first tick is measured from `start`, so the first report counts
    /// every tick since construction.
    pub fn new<F>(interval: Duration, start: Instant, callback: F) -> Self
    where
        F: Fn(Report) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            ticker: Ticker::starting_at(start, None),
            reporter: Reporter::new(ScheduleId::new("tachometer"), interval, start, Arc::new(callback)),
        }
    }

    pub fn from_config<F>(config: &TachometerConfig, start: Instant, callback: F) -> Self
    where
        F: Fn(Report) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let tachometer = Self::new(config.interval, start, callback);
        match config.capacity {
            Some(capacity) => tachometer.with_capacity(capacity),
            None => tachometer,
        }
    }

    /// Name used in logs and executor labels
    pub fn with_id(mut self, id: impl Into<ScheduleId>) -> Self {
        self.reporter.id = id.into();
        self
    }

    /// Keep at most `capacity` intervals per report window.
    ///
    /// Unbounded by default. A bounded window drops the oldest intervals
    /// once full, so reports then cover only the most recent ticks.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        let baseline = self.ticker.last_event();
        self.ticker = match baseline {
            Some(baseline) => Ticker::starting_at(baseline, Some(capacity)),
            None => Ticker::with_capacity(capacity),
        };
        self
    }

    /// Submit reports to `executor` instead of calling back inline
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.reporter.dispatcher = Dispatcher::on(executor);
        self
    }

    pub fn id(&self) -> &ScheduleId {
        &self.reporter.id
    }

    pub fn interval(&self) -> Duration {
        self.reporter.trigger.interval()
    }

    /// Samples collected since the last report
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Record an event at `now` and report if the interval has elapsed.
    ///
    /// Returns whether a report was dispatched.
    pub fn tick(&mut self, now: Instant, timestamp: DateTime<Utc>) -> Result<bool, TachometerError> {
        self.ticker.record_event(now)?;
        let reported = self
            .reporter
            .poll(now, timestamp, self.ticker.window_mut())?;
        Ok(reported)
    }

    /// Tick at the clock's current time
    pub fn poll(&mut self, clock: &impl Clock) -> Result<bool, TachometerError> {
        self.tick(clock.now(), clock.utc_now())
    }
}

/// Reports statistics about the duration of measured regions
#[derive(Debug)]
pub struct DurationTachometer {
    window: IntervalWindow,
    reporter: Reporter,
}

impl DurationTachometer {
    pub fn new<F>(interval: Duration, start: Instant, callback: F) -> Self
    where
        F: Fn(Report) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            window: IntervalWindow::new(None),
            reporter: Reporter::new(
                ScheduleId::new("duration-tachometer"),
                interval,
                start,
                Arc::new(callback),
            ),
        }
    }

    pub fn with_id(mut self, id: impl Into<ScheduleId>) -> Self {
        self.reporter.id = id.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.window = IntervalWindow::new(Some(capacity));
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.reporter.dispatcher = Dispatcher::on(executor);
        self
    }

    /// Samples collected since the last report
    pub fn samples(&self) -> Vec<Duration> {
        self.window.to_vec()
    }

    /// Record a measured duration and report if the interval has elapsed
    pub fn record(
        &mut self,
        elapsed: Duration,
        now: Instant,
        timestamp: DateTime<Utc>,
    ) -> Result<bool, ScheduleError> {
        self.window.push(elapsed);
        self.reporter.poll(now, timestamp, &mut self.window)
    }

    /// Start measuring a region; the duration is recorded when the scope ends
    pub fn start<'a, C: Clock>(&'a mut self, clock: &'a C) -> DurationScope<'a, C> {
        DurationScope {
            started: clock.now(),
            tachometer: self,
            clock,
            finished: false,
        }
    }

    /// Measure `f` and report if the interval has elapsed
    pub fn measure<C: Clock, R>(&mut self, clock: &C, f: impl FnOnce() -> R) -> Result<R, ScheduleError> {
        let scope = self.start(clock);
        let value = f();
        scope.finish()?;
        Ok(value)
    }
}

/// Guard measuring one region for a [`DurationTachometer`]
///
/// [`DurationScope::finish`] returns report failures; a scope that is only
/// dropped (early return, panic) records its sample and logs failures.
pub struct DurationScope<'a, C: Clock> {
    tachometer: &'a mut DurationTachometer,
    clock: &'a C,
    started: Instant,
    finished: bool,
}

impl<C: Clock> DurationScope<'_, C> {
    /// End the region, returning whether a report was dispatched
    pub fn finish(mut self) -> Result<bool, ScheduleError> {
        self.close()
    }

    fn close(&mut self) -> Result<bool, ScheduleError> {
        self.finished = true;
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.started);
        self.tachometer.record(elapsed, now, self.clock.utc_now())
    }
}

impl<C: Clock> Drop for DurationScope<'_, C> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "report failed while closing measured scope");
        }
    }
}

#[cfg(test)]
#[path = "tachometer_tests.rs"]
mod tests;
