// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the timing and scheduling components

use crate::schedule::ScheduleId;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors from recording or reading interval statistics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("no intervals recorded yet")]
    EmptyAccumulator,
    #[error("timestamp precedes the last recorded event by {behind:?}")]
    NonMonotonicTimestamp { behind: Duration },
}

/// Failure raised by a bound callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for CallbackError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors from submitting a job to an executor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    #[error("executor is shut down")]
    ShutDown,
    #[error("executor rejected job: {0}")]
    Rejected(String),
}

/// Errors from polling or building a schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("callback of schedule {id} failed: {source}")]
    Callback {
        id: ScheduleId,
        #[source]
        source: CallbackError,
    },
    #[error("could not dispatch schedule {id}: {source}")]
    Executor {
        id: ScheduleId,
        #[source]
        source: ExecutorError,
    },
    #[error("ordinal schedule {0} needs a positive ordinal")]
    ZeroOrdinal(ScheduleId),
}

impl ScheduleError {
    /// Identifier of the schedule that produced the error
    pub fn schedule_id(&self) -> &ScheduleId {
        match self {
            ScheduleError::Callback { id, .. }
            | ScheduleError::Executor { id, .. }
            | ScheduleError::ZeroOrdinal(id) => id,
        }
    }
}

/// A single failed schedule within a registry poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFailure {
    /// Position of the schedule in registration order
    pub index: usize,
    pub error: ScheduleError,
}

/// Aggregate of every schedule failure collected during one registry poll
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct RegistryPollFailure {
    pub failures: Vec<ScheduleFailure>,
    /// Number of schedules that fired during the poll
    pub fired: usize,
}

impl fmt::Display for RegistryPollFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schedule(s) failed during poll", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; [{}] {}", failure.index, failure.error)?;
        }
        Ok(())
    }
}

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Errors from ticking a tachometer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TachometerError {
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
