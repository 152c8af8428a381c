// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Integration tests for a host frame loop
//!
//! Drives every timer from one fake clock the way an application would.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tp_core::{
    AlarmClock, Clock, DurationTachometer, FakeClock, FakeExecutor, Report, Schedule, StopWatch,
    Tachometer, Ticker,
};

fn collector() -> (Arc<Mutex<Vec<Report>>>, impl Fn(Report) -> Result<(), tp_core::CallbackError>) {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    (reports, move |report: Report| {
        sink.lock().unwrap().push(report);
        Ok(())
    })
}

// =============================================================================
// Frame loop
// =============================================================================

#[test]
fn every_timer_sees_the_same_frames() {
    let clock = FakeClock::new();
    let start = clock.now();
    let stopwatch = StopWatch::with_clock("frame", None, clock.clone());
    let (rate_reports, on_rate) = collector();
    let (work_reports, on_work) = collector();
    let mut rate = Tachometer::new(Duration::from_secs(1), start, on_rate);
    let mut work = DurationTachometer::new(Duration::from_secs(1), start, on_work);
    let mut ticker = Ticker::starting_at(start, None);

    let fired = Arc::new(Mutex::new(Vec::new()));
    let mut alarms = AlarmClock::new();
    for (id, schedule) in [
        ("at", Schedule::at("at", start + Duration::from_millis(1500), {
            let fired = Arc::clone(&fired);
            move || {
                fired.lock().unwrap().push("at");
                Ok(())
            }
        })),
        ("every-second", Schedule::interval("every-second", Duration::from_secs(1), start, {
            let fired = Arc::clone(&fired);
            move || {
                fired.lock().unwrap().push("every-second");
                Ok(())
            }
        })),
    ] {
        assert_eq!(schedule.id().as_str(), id);
        alarms.register(schedule);
    }

    for _ in 0..20 {
        {
            let frame = stopwatch.start();
            work.measure(&clock, || {
                frame.measure("update", || clock.advance(Duration::from_millis(40)));
            })
            .unwrap();
            frame.measure("render", || clock.advance(Duration::from_millis(60)));
        }
        ticker.record_event_now(&clock).unwrap();
        rate.poll(&clock).unwrap();
        alarms.poll(&clock).unwrap();
    }

    let rate_reports = rate_reports.lock().unwrap();
    assert_eq!(rate_reports.len(), 2);
    assert!(rate_reports.iter().all(|r| r.statistics.count == 10));
    assert!((rate_reports[0].statistics.mean - 0.1).abs() < 1e-9);

    let work_reports = work_reports.lock().unwrap();
    // Work is recorded mid-frame, so the window closes one frame late
    assert_eq!(work_reports.len(), 1);
    assert_eq!(work_reports[0].statistics.count, 11);
    assert!((work_reports[0].statistics.mean - 0.04).abs() < 1e-9);

    assert_eq!(ticker.len(), 20);
    assert!((ticker.statistics().unwrap().sum - 2.0).abs() < 1e-9);

    let report = stopwatch.report();
    assert_eq!(report.statistics().unwrap().count, 20);
    assert!((report.find("update").unwrap().statistics().unwrap().mean - 0.04).abs() < 1e-9);
    assert!((report.total_children().as_secs_f64() - 2.0).abs() < 1e-9);

    assert_eq!(
        *fired.lock().unwrap(),
        vec!["every-second", "at", "every-second"]
    );
    assert_eq!(alarms.len(), 1);
}

#[test]
fn reports_can_be_deferred_to_an_executor() {
    let clock = FakeClock::new();
    let executor = FakeExecutor::new();
    let (reports, on_report) = collector();
    let mut rate = Tachometer::new(Duration::from_secs(1), clock.now(), on_report)
        .with_executor(Arc::new(executor.clone()));

    for _ in 0..10 {
        clock.advance(Duration::from_millis(100));
        rate.poll(&clock).unwrap();
    }

    assert!(reports.lock().unwrap().is_empty());
    assert_eq!(executor.pending(), 1);
    assert!(executor.run_pending().is_empty());
    assert_eq!(reports.lock().unwrap()[0].statistics.count, 10);
}
