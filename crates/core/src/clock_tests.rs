// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    let w1 = clock.utc_now();
    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(60));
    assert_eq!(clock.utc_now() - w1, chrono::Duration::seconds(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert_eq!(t2.duration_since(t1), Duration::from_secs(30));
}

#[test]
fn deadline_for_future_wall_time_is_ahead_of_now() {
    let clock = FakeClock::new();
    let target = clock.utc_now() + chrono::Duration::seconds(90);
    let deadline = clock.deadline_for(target);
    assert_eq!(deadline.duration_since(clock.now()), Duration::from_secs(90));
}

#[test]
fn deadline_for_past_wall_time_is_now() {
    let clock = FakeClock::new();
    let target = clock.utc_now() - chrono::Duration::seconds(5);
    assert_eq!(clock.deadline_for(target), clock.now());
}
