//! Multi-interval scenarios driving an LDC queue disc with explicit instants.
//! 使用显式时刻驱动 LDC 队列规则的多周期场景。

pub mod common;

use common::harness::{ScriptedUniform, assert_close, build_scripted, load_only_config};
use ldc_aqm::{
    Config, DropReason, QueueDisc, Verdict,
    packet::{QueueItem, QueueMode},
    qdisc::estimator::estimate_queue_average,
};
use std::time::Duration;
use tokio::time::Instant;

const INTERVAL: Duration = Duration::from_millis(2);

#[test]
fn test_drop_probability_tracks_offered_load() {
    let start = Instant::now();
    let mut disc = build_scripted(load_only_config(), ScriptedUniform::constant(0.5), start);

    // Half the serviceable rate: 0.75 packets per interval at 1.5 Mbps and
    // 500 byte packets, so alternate one and zero arrivals.
    let mut now = start;
    for round in 0..20 {
        if round % 2 == 0 {
            assert!(disc.enqueue(QueueItem::sized(500)).is_accepted());
            disc.dequeue(now);
        }
        now += INTERVAL;
        assert!(disc.poll_timeout(now));
    }
    // With a rate weight of one the load average is the last interval only.
    let snapshot = disc.snapshot();
    assert_close(snapshot.load_average, 0.0);
    assert_close(snapshot.drop_probability, 0.0);

    // One arrival per interval exceeds the 0.95 target ratio.
    assert!(disc.enqueue(QueueItem::sized(500)).is_accepted());
    now += INTERVAL;
    assert!(disc.poll_timeout(now));
    let snapshot = disc.snapshot();
    assert_close(snapshot.load_ratio, 1.0 / 0.75);
    assert_close(snapshot.drop_probability, 1.0);

    let verdict = disc.enqueue(QueueItem::sized(500));
    assert_eq!(verdict, Verdict::Dropped(DropReason::Unforced));
}

#[test]
fn test_timer_fires_once_per_interval() {
    let start = Instant::now();
    let mut disc = build_scripted(Config::default(), ScriptedUniform::constant(0.5), start);

    assert_eq!(disc.next_timeout(), Some(start + INTERVAL));
    assert!(!disc.poll_timeout(start + Duration::from_millis(1)));

    // A late poll runs one recomputation and re-arms at the next slot of the
    // original grid, skipping the slots already missed.
    let late = start + Duration::from_millis(7);
    assert!(disc.poll_timeout(late));
    assert!(!disc.poll_timeout(late));
    assert_eq!(disc.next_timeout(), Some(start + Duration::from_millis(8)));
    assert_eq!(disc.timer().expirations(), 1);
}

#[test]
fn test_late_wakeups_keep_recompute_period() {
    let start = Instant::now();
    let mut disc = build_scripted(load_only_config(), ScriptedUniform::constant(0.5), start);
    let wake_latency = Duration::from_micros(900);

    // Each host wake-up lands almost a millisecond past the deadline, the way
    // a runtime timer rounded up to its tick would.
    let mut deadline = disc.next_timeout().unwrap();
    for k in 1..=100u32 {
        assert_eq!(deadline, start + INTERVAL * k);
        assert!(disc.poll_timeout(deadline + wake_latency));
        deadline = disc.next_timeout().unwrap();
    }
    assert_eq!(disc.timer().expirations(), 100);
    assert_eq!(deadline, start + INTERVAL * 101);

    // One arrival in an interval is still measured against a 2 ms interval.
    assert!(disc.enqueue(QueueItem::sized(500)).is_accepted());
    assert!(disc.poll_timeout(deadline + wake_latency));
    assert_close(disc.snapshot().load_ratio, 1.0 / 0.75);
}

#[test]
fn test_idle_period_decays_average_once() {
    let start = Instant::now();
    let mut disc = build_scripted(Config::default(), ScriptedUniform::constant(0.99), start);

    for _ in 0..10 {
        disc.enqueue(QueueItem::sized(500));
    }
    let t1 = start + INTERVAL;
    assert!(disc.poll_timeout(t1));
    let busy_average = disc.snapshot().queue_average;
    assert_close(busy_average, 0.002 * 10.0);

    while disc.dequeue(t1).is_some() {}
    assert!(disc.snapshot().idle);

    // 200 ms of idleness at 375 packets/s is worth 75 missed samples.
    let t2 = t1 + Duration::from_millis(200);
    assert!(disc.poll_timeout(t2));
    let snapshot = disc.snapshot();
    assert!(!snapshot.idle);
    assert_close(
        snapshot.queue_average,
        estimate_queue_average(0, 76, busy_average, 0.002),
    );

    // The following interval is not treated as idle again.
    let t3 = t2 + INTERVAL;
    assert!(disc.poll_timeout(t3));
    assert_close(
        disc.snapshot().queue_average,
        estimate_queue_average(0, 1, snapshot.queue_average, 0.002),
    );
}

#[test]
fn test_byte_mode_limit_and_target() {
    let start = Instant::now();
    let mut config = Config::default();
    config.queue.mode = QueueMode::Bytes;
    config.queue.queue_limit = 1500;
    let mut disc = build_scripted(config, ScriptedUniform::constant(0.5), start);

    assert_close(disc.snapshot().queue_target, 1500.0 * 500.0);

    assert!(disc.enqueue(QueueItem::sized(1000)).is_accepted());
    assert!(disc.enqueue(QueueItem::sized(500)).is_accepted());
    assert_eq!(disc.queue_size(), 1500);
    assert_eq!(
        disc.enqueue(QueueItem::sized(1)),
        Verdict::Dropped(DropReason::Forced)
    );

    disc.dequeue(start);
    assert_eq!(disc.queue_size(), 500);
    assert!(disc.enqueue(QueueItem::sized(1000)).is_accepted());
    assert_eq!(disc.stats().capacity_drop_count, 1);
}

#[test]
fn test_stats_display_lists_counters() {
    let start = Instant::now();
    let mut config = Config::default();
    config.queue.queue_limit = 1;
    let mut disc = build_scripted(config, ScriptedUniform::constant(0.5), start);

    disc.enqueue(QueueItem::sized(500));
    disc.enqueue(QueueItem::sized(500));

    assert_eq!(
        disc.stats().to_string(),
        "LdcStats { early: 0, capacity: 1, limit: 1 }"
    );
    assert_eq!(disc.stats().total_drops(), 1);
}
