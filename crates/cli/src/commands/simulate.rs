// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tp simulate` - Run a simulated frame loop
//!
//! Time comes from a fake clock advanced by each frame's simulated work,
//! so runs are deterministic for a given seed.

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tp_adapters::{
    JsonLinesMetricsAdapter, LogMetricsAdapter, MetricsAdapter, MetricsTachometer,
    TracedMetricsAdapter,
};
use tp_core::{
    AlarmClock, Clock, FakeClock, MetricsConfig, Schedule, Statistics, StopWatch, TimepieceConfig,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of frames to run
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Nominal duration of one frame
    #[arg(long, default_value = "20ms", value_parser = humantime::parse_duration)]
    pub frame_time: Duration,

    /// Maximum deviation from the nominal frame time
    #[arg(long, default_value = "5ms", value_parser = humantime::parse_duration)]
    pub jitter: Duration,

    /// Reporting interval; overrides the config file
    #[arg(long, value_parser = humantime::parse_duration)]
    pub report_every: Option<Duration>,

    /// Period of the heartbeat schedule
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub heartbeat: Duration,

    /// Fire the checkpoint schedule every N frames
    #[arg(long, default_value_t = 100)]
    pub checkpoint_every: u64,

    /// Seed for the frame time jitter
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Publish reports and the summary as JSON lines on stdout
    #[arg(long)]
    pub json: bool,
}

/// Settings for one simulation run
#[derive(Debug, Clone)]
pub struct Settings {
    pub frames: u64,
    pub frame_time: Duration,
    pub jitter: Duration,
    pub heartbeat: Duration,
    pub checkpoint_every: u64,
    pub seed: u64,
    pub metrics: MetricsConfig,
    pub stopwatch_capacity: Option<usize>,
}

impl Settings {
    pub fn resolve(args: &SimulateArgs, config: &TimepieceConfig) -> Self {
        let mut metrics = config.metrics.clone().unwrap_or_else(|| {
            MetricsConfig::new("timepiece", "frame_interval").with_interval(Duration::from_secs(1))
        });
        if let Some(interval) = args.report_every {
            metrics.interval = interval;
        }
        Self {
            frames: args.frames,
            frame_time: args.frame_time,
            jitter: args.jitter,
            heartbeat: args.heartbeat,
            checkpoint_every: args.checkpoint_every,
            seed: args.seed,
            metrics,
            stopwatch_capacity: config.stopwatch.capacity,
        }
    }
}

/// Outcome of a simulation run
#[derive(Debug, Serialize)]
pub struct Summary {
    pub frames: u64,
    pub reports: u64,
    pub heartbeats: u64,
    pub checkpoints: u64,
    pub simulated_secs: f64,
    /// Statistics of whole-frame durations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Statistics>,
    #[serde(skip)]
    pub timers: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(f, "reports: {}", self.reports)?;
        writeln!(f, "heartbeats: {}", self.heartbeats)?;
        writeln!(f, "checkpoints: {}", self.checkpoints)?;
        writeln!(f, "simulated: {:.3}s", self.simulated_secs)?;
        write!(f, "{}", self.timers)
    }
}

/// Seeded frame time generator
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `base` shifted by at most `amplitude` either way, never negative
    pub fn frame_time(&mut self, base: Duration, amplitude: Duration) -> Result<Duration> {
        let offset = amplitude.as_secs_f64() * self.rng.gen_range(-1.0f64..1.0);
        let secs = (base.as_secs_f64() + offset).max(0.0);
        Duration::try_from_secs_f64(secs)
            .with_context(|| format!("frame time of {secs}s is out of range"))
    }
}

pub fn simulate(args: SimulateArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, &config);

    if args.json {
        let summary = run(&settings, JsonLinesMetricsAdapter::stdout())?;
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        let summary = run(&settings, TracedMetricsAdapter::new(LogMetricsAdapter::new()))?;
        print!("{summary}");
    }
    Ok(())
}

/// Run the frame loop, publishing reports through `adapter`
pub fn run<M: MetricsAdapter>(settings: &Settings, adapter: M) -> Result<Summary> {
    let clock = FakeClock::new();
    let started = clock.now();
    let stopwatch = StopWatch::with_clock("frame", settings.stopwatch_capacity, clock.clone());
    let mut tachometer = MetricsTachometer::new(settings.metrics.clone(), adapter, started);

    let heartbeats = Arc::new(AtomicU64::new(0));
    let checkpoints = Arc::new(AtomicU64::new(0));
    let mut alarms = AlarmClock::new();
    alarms.register(Schedule::interval("heartbeat", settings.heartbeat, started, {
        let heartbeats = Arc::clone(&heartbeats);
        move || {
            let n = heartbeats.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::info!(heartbeat = n, "alive");
            Ok(())
        }
    }));
    alarms.register(Schedule::ordinal("checkpoint", settings.checkpoint_every, {
        let checkpoints = Arc::clone(&checkpoints);
        move || {
            checkpoints.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })?);

    let mut jitter = Jitter::new(settings.seed);
    let mut reports = 0;
    for _ in 0..settings.frames {
        let frame_time = jitter.frame_time(settings.frame_time, settings.jitter)?;
        let update = frame_time.mul_f64(0.4);
        {
            let frame = stopwatch.start();
            frame.measure("update", || clock.advance(update));
            frame.measure("render", || clock.advance(frame_time.saturating_sub(update)));
        }
        if tachometer.poll(&clock)? {
            reports += 1;
        }
        alarms.poll(&clock)?;
    }

    let simulated = clock.now().saturating_duration_since(started);
    tracing::debug!(frames = settings.frames, reports, "simulation finished");

    Ok(Summary {
        frames: settings.frames,
        reports,
        heartbeats: heartbeats.load(Ordering::SeqCst),
        checkpoints: checkpoints.load(Ordering::SeqCst),
        simulated_secs: simulated.as_secs_f64(),
        frame: stopwatch.statistics().ok(),
        timers: format!("{}\n", stopwatch.report()),
    })
}

#[cfg(test)]
#[path = "simulate_tests.rs"]
mod tests;
