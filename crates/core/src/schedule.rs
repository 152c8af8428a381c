// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedules driven by an external loop
//!
//! A [`Schedule`] pairs a [`Trigger`] with a callback. The host loop calls
//! [`Schedule::tick`] once per iteration; the schedule never sleeps or spawns
//! threads, so timing is only as fine as the caller's polling.
//!
//! Trigger policies:
//! - `At`: fires once, on the first tick at or after a deadline
//! - `Interval`: fires whenever the interval has elapsed since the previous
//!   fire (or since construction)
//! - `Ordinal`: fires on every Nth tick

use crate::clock::Clock;
use crate::error::{CallbackError, ScheduleError};
use crate::executor::{Dispatcher, Executor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Unique identifier for a schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub String);

impl ScheduleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ScheduleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ScheduleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Callback bound to a schedule
pub type Callback = Arc<dyn Fn() -> Result<(), CallbackError> + Send + Sync>;

/// Observable state of a trigger at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Not due yet
    Pending,
    /// The next tick fires
    Due,
    /// Terminal, never fires again
    Fired,
}

/// One-shot deadline
#[derive(Debug, Clone)]
pub struct AtTrigger {
    at: Instant,
    fired: bool,
}

impl AtTrigger {
    pub fn at(&self) -> Instant {
        self.at
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.at {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Fixed minimum spacing between fires
#[derive(Debug, Clone)]
pub struct IntervalTrigger {
    interval: Duration,
    last_fire: Instant,
}

impl IntervalTrigger {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_fire: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant of the previous fire, or the start instant before the first
    pub fn last_fire(&self) -> Instant {
        self.last_fire
    }

    /// Earliest instant at which the trigger can fire again
    pub fn next_fire(&self) -> Instant {
        self.last_fire + self.interval
    }

    fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_fire) >= self.interval
    }

    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last_fire = now;
        true
    }
}

/// Fires on every Nth poll
#[derive(Debug, Clone)]
pub struct OrdinalTrigger {
    ordinal: NonZeroU64,
    counter: u64,
}

impl OrdinalTrigger {
    pub fn ordinal(&self) -> u64 {
        self.ordinal.get()
    }

    /// Polls since the last fire
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn poll(&mut self) -> bool {
        self.counter = (self.counter + 1) % self.ordinal.get();
        self.counter == 0
    }
}

/// The closed set of trigger policies
#[derive(Debug, Clone)]
pub enum Trigger {
    At(AtTrigger),
    Interval(IntervalTrigger),
    Ordinal(OrdinalTrigger),
}

impl Trigger {
    pub fn at(at: Instant) -> Self {
        Trigger::At(AtTrigger { at, fired: false })
    }

    pub fn interval(interval: Duration, start: Instant) -> Self {
        Trigger::Interval(IntervalTrigger::new(interval, start))
    }

    /// `None` when `ordinal` is zero
    pub fn ordinal(ordinal: u64) -> Option<Self> {
        NonZeroU64::new(ordinal).map(|ordinal| Trigger::Ordinal(OrdinalTrigger { ordinal, counter: 0 }))
    }

    /// Advance the trigger state, returning whether it fires at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        match self {
            Trigger::At(t) => t.poll(now),
            Trigger::Interval(t) => t.poll(now),
            Trigger::Ordinal(t) => t.poll(),
        }
    }

    pub fn state(&self, now: Instant) -> TriggerState {
        match self {
            Trigger::At(t) if t.fired => TriggerState::Fired,
            Trigger::At(t) if now >= t.at => TriggerState::Due,
            Trigger::Interval(t) if t.is_due(now) => TriggerState::Due,
            Trigger::Ordinal(t) if (t.counter + 1) % t.ordinal.get() == 0 => TriggerState::Due,
            _ => TriggerState::Pending,
        }
    }

    pub fn is_repeating(&self) -> bool {
        !matches!(self, Trigger::At(_))
    }

    /// True once the trigger can never fire again
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Trigger::At(t) if t.fired)
    }
}

/// A trigger bound to a callback
pub struct Schedule {
    id: ScheduleId,
    trigger: Trigger,
    callback: Callback,
    dispatcher: Dispatcher,
}

impl Schedule {
    pub fn new<F>(id: impl Into<ScheduleId>, trigger: Trigger, callback: F) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            trigger,
            callback: Arc::new(callback),
            dispatcher: Dispatcher::inline(),
        }
    }

    /// Fire once, on the first tick at or after `at`
    pub fn at<F>(id: impl Into<ScheduleId>, at: Instant, callback: F) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self::new(id, Trigger::at(at), callback)
    }

    /// Fire once at a wall-clock time, measured against `clock`
    pub fn at_datetime<F>(
        id: impl Into<ScheduleId>,
        at: DateTime<Utc>,
        clock: &impl Clock,
        callback: F,
    ) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self::at(id, clock.deadline_for(at), callback)
    }

    /// Fire every `interval`, counting from `start`
    pub fn interval<F>(id: impl Into<ScheduleId>, interval: Duration, start: Instant, callback: F) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self::new(id, Trigger::interval(interval, start), callback)
    }

    /// Fire on every `ordinal`th tick
    pub fn ordinal<F>(id: impl Into<ScheduleId>, ordinal: u64, callback: F) -> Result<Self, ScheduleError>
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let id = id.into();
        let trigger = Trigger::ordinal(ordinal).ok_or_else(|| ScheduleError::ZeroOrdinal(id.clone()))?;
        Ok(Self::new(id, trigger, callback))
    }

    /// Submit fired callbacks to `executor` instead of running them inline
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.dispatcher = Dispatcher::on(executor);
        self
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn is_repeating(&self) -> bool {
        self.trigger.is_repeating()
    }

    pub fn is_exhausted(&self) -> bool {
        self.trigger.is_exhausted()
    }

    /// Move a one-shot schedule to a new deadline and make it pending again.
    ///
    /// Returns false for repeating schedules, which are left untouched.
    pub fn rearm(&mut self, at: Instant) -> bool {
        match &mut self.trigger {
            Trigger::At(t) => {
                t.at = at;
                t.fired = false;
                true
            }
            _ => false,
        }
    }

    /// Evaluate the trigger at `now` and dispatch the callback if due.
    ///
    /// Returns whether the schedule fired. The trigger state advances even
    /// when an inline callback fails; the failure is returned.
    pub fn tick(&mut self, now: Instant) -> Result<bool, ScheduleError> {
        if !self.trigger.poll(now) {
            return Ok(false);
        }
        tracing::debug!(schedule = %self.id, "fired");
        self.fire()?;
        Ok(true)
    }

    /// Tick at the clock's current time
    pub fn poll(&mut self, clock: &impl Clock) -> Result<bool, ScheduleError> {
        self.tick(clock.now())
    }

    /// Dispatch the callback regardless of the trigger
    pub fn fire(&self) -> Result<(), ScheduleError> {
        let callback = Arc::clone(&self.callback);
        self.dispatcher.dispatch(&self.id, Box::new(move || callback()))
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
