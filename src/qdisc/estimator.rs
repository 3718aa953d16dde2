//! LDC 估计器的纯函数部分
//! Pure functions behind the LDC estimator

use crate::random::UniformSource;

/// Computes the new average queue size.
///
/// The old average decays once per sampling interval, `m` times in total,
/// before the fresh sample is blended in. `m` is 1 for a busy queue and grows
/// with the length of an idle period.
///
/// 计算新的平均队列长度。旧平均值在混入新样本之前按采样间隔衰减 `m` 次。
/// 队列繁忙时 `m` 为 1，空闲期越长 `m` 越大。
pub fn estimate_queue_average(n_queued: u32, m: u32, q_avg: f64, q_w: f64) -> f64 {
    let decayed = q_avg * (1.0 - q_w).powf(f64::from(m));
    decayed + q_w * f64::from(n_queued)
}

/// Number of packets the link could have sent while the queue sat idle.
///
/// 队列空闲期间链路本可以发送的包数。
pub fn idle_packet_count(service_rate: f64, idle_secs: f64) -> u32 {
    // `as` saturates, so very long idle periods clamp to u32::MAX.
    (service_rate * idle_secs).floor() as u32
}

/// `(value / target)^exponent`, clamped to at most 1.
///
/// `(value / target)^exponent`，上限截断为 1。
pub fn normalized_signal(value: f64, target: f64, exponent: u32) -> f64 {
    let exponent = i32::try_from(exponent).unwrap_or(i32::MAX);
    (value / target).powi(exponent).min(1.0)
}

/// Blends the delay and load signals into a drop probability in `[0, 1]`.
///
/// 将时延信号和负载信号混合为 `[0, 1]` 区间的丢包概率。
pub fn blend_drop_probability(delay_weight: f64, q_norm: f64, r_norm: f64) -> f64 {
    let p = delay_weight * q_norm + (1.0 - delay_weight) * r_norm;
    if p.is_nan() { 1.0 } else { p.clamp(0.0, 1.0) }
}

/// Bernoulli trial against `drop_probability`.
///
/// A zero probability never drops, whatever the draw.
///
/// 针对 `drop_probability` 的伯努利试验。概率为零时无论抽到什么值都不丢包。
pub fn early_drop_trial<R: UniformSource + ?Sized>(rng: &mut R, drop_probability: f64) -> bool {
    let u = rng.next_uniform();
    drop_probability > 0.0 && u <= drop_probability
}
