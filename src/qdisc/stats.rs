//! LDC 队列规则的统计与内省
//! Statistics and introspection for the LDC queue disc

use std::fmt;
use tokio::time::Instant;

/// LDC 丢包统计
/// LDC drop statistics
///
/// Counters only ever grow until the next parameter initialization.
///
/// 计数器只增不减，直到下一次参数初始化。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LdcStats {
    /// 概率性早期丢包
    /// Early probability drops
    pub early_drop_count: u64,
    /// 强制丢包（超过队列限制）
    /// Forced drops, queue limit exceeded
    pub capacity_drop_count: u64,
    /// 因队列限制导致的丢包
    /// Drops due to queue limits
    pub limit_drop_count: u64,
}

impl LdcStats {
    pub fn total_drops(&self) -> u64 {
        self.early_drop_count + self.capacity_drop_count
    }
}

impl fmt::Display for LdcStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LdcStats {{ early: {}, capacity: {}, limit: {} }}",
            self.early_drop_count, self.capacity_drop_count, self.limit_drop_count
        )
    }
}

/// A read-only view of the estimator state.
///
/// 估计器状态的只读视图。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSnapshot {
    pub queue_average: f64,
    pub load_average: f64,
    pub load_ratio: f64,
    pub drop_probability: f64,
    pub idle: bool,
    pub idle_since: Instant,
    pub interval_arrivals: u32,
    /// Packets per second the link can serve.
    /// 链路每秒可服务的包数。
    pub service_rate: f64,
    /// Target queue size in the configured unit.
    /// 以配置单位表示的目标队列长度。
    pub queue_target: f64,
}

impl fmt::Display for EstimatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q_avg={:.4} n_pkt={:.4} ratio={:.4} v_prob={:.4} idle={}",
            self.queue_average,
            self.load_average,
            self.load_ratio,
            self.drop_probability,
            self.idle
        )
    }
}
