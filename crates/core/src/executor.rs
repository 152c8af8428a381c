// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback dispatch
//!
//! A fired callback either runs inline on the polling thread or is handed to
//! an [`Executor`]. Both paths go through [`Dispatcher::dispatch`]; they only
//! differ in where the job runs and where its failure is reported.

use crate::error::{CallbackError, ExecutorError, ScheduleError};
use crate::schedule::ScheduleId;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

/// A unit of callback work
pub type Job = Box<dyn FnOnce() -> Result<(), CallbackError> + Send + 'static>;

/// Accepts jobs for execution off the polling thread.
///
/// Implementations own the failure channel for the jobs they run: a failing
/// job must never surface on the thread that submitted it.
pub trait Executor: Send + Sync {
    /// Submit a job without waiting for it to run
    fn submit(&self, label: &str, job: Job) -> Result<(), ExecutorError>;
}

/// Runs a fired callback inline or on an executor
#[derive(Clone, Default)]
pub struct Dispatcher {
    executor: Option<Arc<dyn Executor>>,
}

impl Dispatcher {
    /// Run callbacks on the polling thread
    pub fn inline() -> Self {
        Self { executor: None }
    }

    /// Submit callbacks to `executor`
    pub fn on(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor: Some(executor),
        }
    }

    pub fn is_async(&self) -> bool {
        self.executor.is_some()
    }

    /// Run or submit `job` on behalf of schedule `id`.
    ///
    /// Inline failures are returned; submitted jobs only fail here when the
    /// executor refuses them.
    pub fn dispatch(&self, id: &ScheduleId, job: Job) -> Result<(), ScheduleError> {
        match &self.executor {
            None => job().map_err(|source| {
                tracing::warn!(schedule = %id, error = %source, "callback failed");
                ScheduleError::Callback {
                    id: id.clone(),
                    source,
                }
            }),
            Some(executor) => executor.submit(id.as_str(), job).map_err(|source| {
                tracing::warn!(schedule = %id, error = %source, "executor rejected callback");
                ScheduleError::Executor {
                    id: id.clone(),
                    source,
                }
            }),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("async", &self.is_async())
            .finish()
    }
}

/// Executor running jobs on a tokio runtime's blocking pool
///
/// Failed and panicked jobs are logged and counted in
/// [`TokioExecutor::failures`]. A job the runtime drops without running (the
/// runtime shut down before or after it was accepted) is logged and counted
/// in [`TokioExecutor::lost`]. When that happens during `submit` the call
/// fails with [`ExecutorError::ShutDown`].
#[derive(Clone, Debug)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
    failures: Arc<AtomicU64>,
    lost: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl TokioExecutor {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle,
            failures: Arc::new(AtomicU64::new(0)),
            lost: Arc::new(AtomicU64::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Executor bound to the runtime of the calling context
    pub fn current() -> Result<Self, ExecutorError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| ExecutorError::Rejected(e.to_string()))
    }

    /// Number of jobs that returned an error or panicked
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Number of accepted jobs dropped without running
    pub fn lost(&self) -> u64 {
        self.lost.load(Ordering::Relaxed)
    }

    /// Reject all further submissions; jobs already accepted still run
    pub fn shut_down(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl Executor for TokioExecutor {
    fn submit(&self, label: &str, job: Job) -> Result<(), ExecutorError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ExecutorError::ShutDown);
        }
        let state = Arc::new(AtomicU8::new(JOB_PENDING));
        let tracked = TrackedJob {
            label: label.to_string(),
            job: Some(job),
            state: Arc::clone(&state),
            failures: Arc::clone(&self.failures),
            lost: Arc::clone(&self.lost),
        };
        self.handle.spawn_blocking(move || tracked.run());
        // A runtime that is already shut down drops the task on the spot
        if state.load(Ordering::SeqCst) == JOB_LOST {
            return Err(ExecutorError::ShutDown);
        }
        Ok(())
    }
}

const JOB_PENDING: u8 = 0;
const JOB_RUNNING: u8 = 1;
const JOB_DONE: u8 = 2;
const JOB_LOST: u8 = 3;

/// Job wrapper that reports, on drop, how far its job got
struct TrackedJob {
    label: String,
    job: Option<Job>,
    state: Arc<AtomicU8>,
    failures: Arc<AtomicU64>,
    lost: Arc<AtomicU64>,
}

impl TrackedJob {
    fn run(mut self) {
        let Some(job) = self.job.take() else {
            return;
        };
        self.state.store(JOB_RUNNING, Ordering::SeqCst);
        if let Err(error) = job() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(job = %self.label, error = %error, "async callback failed");
        }
        self.state.store(JOB_DONE, Ordering::SeqCst);
    }
}

impl Drop for TrackedJob {
    fn drop(&mut self) {
        match self.state.load(Ordering::SeqCst) {
            JOB_PENDING => {
                self.state.store(JOB_LOST, Ordering::SeqCst);
                self.lost.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(job = %self.label, "runtime dropped callback before it ran");
            }
            JOB_RUNNING => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(job = %self.label, "async callback panicked");
            }
            _ => {}
        }
    }
}

/// Fake executor for testing
///
/// Jobs queue up until [`FakeExecutor::run_pending`] runs them on the caller's
/// thread.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    queue: Arc<Mutex<VecDeque<(String, Job)>>>,
    closed: Arc<Mutex<bool>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submitted jobs that have not run yet
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Labels of the queued jobs in submission order
    pub fn pending_labels(&self) -> Vec<String> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Run every queued job, returning the failures by label
    pub fn run_pending(&self) -> Vec<(String, CallbackError)> {
        let jobs: Vec<(String, Job)> = self
            .queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();
        jobs.into_iter()
            .filter_map(|(label, job)| job().err().map(|e| (label, e)))
            .collect()
    }

    /// Reject all further submissions
    pub fn shut_down(&self) {
        *self.closed.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }
}

impl Executor for FakeExecutor {
    fn submit(&self, label: &str, job: Job) -> Result<(), ExecutorError> {
        if *self.closed.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ExecutorError::ShutDown);
        }
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back((label.to_string(), job));
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
