// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AlarmClock - fans one tick out to many schedules

use crate::clock::Clock;
use crate::error::{RegistryPollFailure, ScheduleFailure};
use crate::schedule::{Schedule, ScheduleId};
use std::time::Instant;

/// Ordered collection of schedules polled together
#[derive(Debug, Default)]
pub struct AlarmClock {
    schedules: Vec<Schedule>,
}

impl AlarmClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedules(schedules: Vec<Schedule>) -> Self {
        Self { schedules }
    }

    /// Append a schedule; it is polled after every schedule registered before it
    pub fn register(&mut self, schedule: Schedule) {
        tracing::debug!(schedule = %schedule.id(), "registered");
        self.schedules.push(schedule);
    }

    /// Remove every schedule with the given id, returning how many were removed
    pub fn remove(&mut self, id: &ScheduleId) -> usize {
        let before = self.schedules.len();
        self.schedules.retain(|s| s.id() != id);
        before - self.schedules.len()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Registered schedule ids in polling order
    pub fn ids(&self) -> Vec<&ScheduleId> {
        self.schedules.iter().map(|s| s.id()).collect()
    }

    /// Tick every schedule, in registration order, with the same `now`.
    ///
    /// A failing schedule does not stop the poll: failures are collected and
    /// returned once every schedule has been ticked. One-shot schedules that
    /// have fired are dropped afterwards. Returns the number of schedules
    /// that fired.
    pub fn tick(&mut self, now: Instant) -> Result<usize, RegistryPollFailure> {
        let mut fired = 0;
        let mut failures = Vec::new();

        for (index, schedule) in self.schedules.iter_mut().enumerate() {
            match schedule.tick(now) {
                Ok(true) => fired += 1,
                Ok(false) => {}
                Err(error) => {
                    // The trigger advanced before dispatch failed
                    fired += 1;
                    failures.push(ScheduleFailure { index, error });
                }
            }
        }

        self.schedules.retain(|s| !s.is_exhausted());

        if failures.is_empty() {
            Ok(fired)
        } else {
            tracing::warn!(failed = failures.len(), fired, "alarm clock poll had failures");
            Err(RegistryPollFailure { failures, fired })
        }
    }

    /// Tick at the clock's current time
    pub fn poll(&mut self, clock: &impl Clock) -> Result<usize, RegistryPollFailure> {
        self.tick(clock.now())
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
