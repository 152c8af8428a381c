// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use proptest::prelude::*;

#[test]
fn first_event_sets_baseline_only() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();

    assert_eq!(ticker.record_event_now(&clock), Ok(None));
    assert!(ticker.is_empty());
    assert_eq!(ticker.statistics(), Err(TimingError::EmptyAccumulator));
    assert_eq!(ticker.last_event(), Some(clock.now()));
}

#[test]
fn records_interval_between_events() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();

    ticker.record_event_now(&clock).unwrap();
    clock.advance(Duration::from_millis(40));
    let interval = ticker.record_event_now(&clock).unwrap();

    assert_eq!(interval, Some(Duration::from_millis(40)));
    assert_eq!(ticker.intervals(), vec![Duration::from_millis(40)]);
}

#[test]
fn rejects_timestamp_before_last_event() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();
    let early = clock.now();

    clock.advance(Duration::from_secs(1));
    ticker.record_event_now(&clock).unwrap();

    assert_eq!(
        ticker.record_event(early),
        Err(TimingError::NonMonotonicTimestamp {
            behind: Duration::from_secs(1)
        })
    );
    assert_eq!(ticker.last_event(), Some(clock.now()));
    assert!(ticker.is_empty());
}

#[test]
fn equal_timestamps_record_zero_interval() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();
    ticker.record_event_now(&clock).unwrap();
    ticker.record_event_now(&clock).unwrap();
    assert_eq!(ticker.intervals(), vec![Duration::ZERO]);
}

#[test]
fn reset_keeps_baseline() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();
    ticker.record_event_now(&clock).unwrap();
    clock.advance(Duration::from_millis(10));
    ticker.record_event_now(&clock).unwrap();

    ticker.reset();
    clock.advance(Duration::from_millis(25));
    ticker.record_event_now(&clock).unwrap();

    assert_eq!(ticker.intervals(), vec![Duration::from_millis(25)]);
}

#[test]
fn starting_at_measures_first_event_from_baseline() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::starting_at(clock.now(), None);
    clock.advance(Duration::from_millis(5));
    assert_eq!(
        ticker.record_event_now(&clock),
        Ok(Some(Duration::from_millis(5)))
    );
}

#[test]
fn display_renders_recent_intervals_and_statistics() {
    let clock = FakeClock::new();
    let mut ticker = Ticker::new();
    assert_eq!(ticker.to_string(), "<Ticker>");

    ticker.record_event_now(&clock).unwrap();
    for ms in [100, 200, 300, 400, 500, 600] {
        clock.advance(Duration::from_millis(ms));
        ticker.record_event_now(&clock).unwrap();
    }

    assert_eq!(
        ticker.to_string(),
        "<Ticker intervals=[0.1000, 0.2000, 0.3000, 0.4000, 0.5000, ...] \
         min=0.1000 mean=0.3500 max=0.6000>"
    );
}

proptest! {
    #[test]
    fn stored_intervals_are_successive_differences(
        gaps in proptest::collection::vec(0u64..1_000_000, 1..40),
        capacity in proptest::option::of(1usize..16),
    ) {
        let clock = FakeClock::new();
        let mut ticker = match capacity {
            Some(capacity) => Ticker::with_capacity(capacity),
            None => Ticker::new(),
        };
        ticker.record_event_now(&clock).unwrap();
        for gap in &gaps {
            clock.advance(Duration::from_micros(*gap));
            ticker.record_event_now(&clock).unwrap();
        }

        let all: Vec<Duration> = gaps.iter().map(|g| Duration::from_micros(*g)).collect();
        let keep = capacity.unwrap_or(all.len()).min(all.len());
        prop_assert_eq!(ticker.intervals(), all[all.len() - keep..].to_vec());

        let stats = ticker.statistics().unwrap();
        prop_assert_eq!(stats.count, keep);
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }
}
