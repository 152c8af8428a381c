// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tp-core: timing, statistics and cooperative scheduling for frame loops
//!
//! This crate provides:
//! - Interval measurement between recurring events ([`Ticker`])
//! - Nested scope timing with per-name statistics ([`StopWatch`])
//! - Schedules polled by the host loop ([`Schedule`], [`AlarmClock`])
//! - Periodic statistics reports ([`Tachometer`], [`DurationTachometer`])
//!
//! Nothing here spawns threads or sleeps: the host loop drives time by
//! calling `tick`. Fired callbacks may optionally be handed to an
//! [`Executor`]. All durations are reported in seconds.

pub mod clock;
pub mod config;
pub mod error;
pub mod executor;
pub mod stats;

// Components (order matters for dependencies)
pub mod ticker;
pub mod stopwatch;
pub mod schedule;
pub mod alarm;
pub mod tachometer;

// Re-exports
pub use alarm::AlarmClock;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{MetricsConfig, RetryPolicy, StopWatchConfig, TachometerConfig, TimepieceConfig};
pub use error::{
    CallbackError, ConfigError, ExecutorError, RegistryPollFailure, ScheduleError, ScheduleFailure,
    TachometerError, TimingError,
};
pub use executor::{Dispatcher, Executor, FakeExecutor, Job, TokioExecutor};
pub use schedule::{Callback, Schedule, ScheduleId, Trigger, TriggerState};
pub use stats::{IntervalWindow, Statistics};
pub use stopwatch::{Scope, StopWatch, TimerReport};
pub use tachometer::{DurationScope, DurationTachometer, Report, ReportCallback, Tachometer};
pub use ticker::Ticker;
