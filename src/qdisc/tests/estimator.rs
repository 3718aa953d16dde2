//! 估计器纯函数的测试
//! Tests for the estimator's pure functions

use super::{FixedUniform, assert_close};
use crate::qdisc::estimator::{
    blend_drop_probability, early_drop_trial, estimate_queue_average, idle_packet_count,
    normalized_signal,
};

#[test]
fn test_single_step_is_standard_ewma() {
    let q_avg = 12.5;
    let q_w = 0.002;
    assert_close(
        estimate_queue_average(20, 1, q_avg, q_w),
        q_avg * (1.0 - q_w) + q_w * 20.0,
    );
}

#[test]
fn test_long_idle_decays_old_average_away() {
    let avg = estimate_queue_average(40, 1_000_000, 500.0, 0.002);
    assert_close(avg, 0.002 * 40.0);

    let avg = estimate_queue_average(40, u32::MAX, 500.0, 0.002);
    assert_close(avg, 0.002 * 40.0);
}

#[test]
fn test_decay_is_monotonic_in_m() {
    let mut previous = f64::MAX;
    for m in 1..50 {
        let avg = estimate_queue_average(0, m, 100.0, 0.05);
        assert!(avg < previous);
        previous = avg;
    }
}

#[test]
fn test_idle_packet_count_floors() {
    assert_eq!(idle_packet_count(375.0, 0.1), 37);
    assert_eq!(idle_packet_count(375.0, 0.001), 0);
    assert_eq!(idle_packet_count(375.0, 1.0), 375);
    assert_eq!(idle_packet_count(1e12, 1e6), u32::MAX);
}

#[test]
fn test_normalized_signal_is_clamped() {
    assert_close(normalized_signal(0.5, 1.0, 3), 0.125);
    assert_close(normalized_signal(3.0, 1.0, 3), 1.0);
    assert_close(normalized_signal(0.0, 0.95, 3), 0.0);
    assert_close(normalized_signal(0.95, 0.95, 7), 1.0);
}

#[test]
fn test_blend_weights_and_clamps() {
    assert_close(blend_drop_probability(0.75, 1.0, 0.0), 0.75);
    assert_close(blend_drop_probability(0.75, 0.0, 1.0), 0.25);
    assert_close(blend_drop_probability(0.5, 1.0, 1.0), 1.0);
    assert_close(blend_drop_probability(0.0, 0.3, 0.6), 0.6);
    assert_close(blend_drop_probability(0.5, f64::NAN, 0.0), 1.0);
}

#[test]
fn test_early_drop_trial_thresholds() {
    assert!(!early_drop_trial(&mut FixedUniform(0.0), 0.0));
    assert!(!early_drop_trial(&mut FixedUniform(0.5), 0.0));
    assert!(early_drop_trial(&mut FixedUniform(0.999_999), 1.0));
    assert!(early_drop_trial(&mut FixedUniform(0.3), 0.3));
    assert!(!early_drop_trial(&mut FixedUniform(0.31), 0.3));
}
