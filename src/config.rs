//! 定义了 LDC 队列规则的可配置参数。
//! Defines configurable parameters for the LDC queue discipline.

use crate::{
    error::{Error, Result},
    packet::{DataRate, QueueMode},
};
use std::time::Duration;

/// A structure containing all configurable parameters of an LDC queue disc.
///
/// 包含 LDC 队列规则所有可配置参数的结构体。
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Queue sizing parameters.
    /// 队列大小相关参数。
    pub queue: QueueConfig,

    /// Parameters of the outgoing link.
    /// 出口链路相关参数。
    pub link: LinkConfig,

    /// Parameters of the drop probability controller.
    /// 丢包概率控制器相关参数。
    pub control: ControlConfig,
}

/// Queue sizing parameters.
///
/// 队列大小相关参数。
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Determines the unit of `queue_limit` and of the measured occupancy.
    /// 决定 `queue_limit` 和队列占用量的单位。
    pub mode: QueueMode,
    /// Average packet size in bytes. Only used to derive the service rate.
    /// 平均包大小（字节）。仅用于推导服务速率。
    pub mean_packet_size: u32,
    /// Hard queue limit in bytes or packets.
    /// 以字节或包为单位的硬性队列限制。
    pub queue_limit: u32,
    /// Weight given to the current queue size sample in the EWMA.
    /// EWMA 中当前队列长度样本的权重。
    pub queue_weight: f64,
}

/// Parameters of the outgoing link.
///
/// 出口链路相关参数。
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// The link bandwidth.
    /// 链路带宽。
    pub bandwidth: DataRate,
    /// The link propagation delay. Informational only.
    /// 链路传播时延。仅供参考。
    pub delay: Duration,
}

/// Parameters of the drop probability controller.
///
/// 丢包概率控制器相关参数。
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// The interval after which the drop probability is recomputed.
    /// 重新计算丢包概率的时间间隔。
    pub recompute_interval: Duration,
    /// Weight given to the current arrival count in the load EWMA.
    /// 负载 EWMA 中当前到达数的权重。
    pub rate_weight: f64,
    /// Weight of the delay component in the drop probability.
    /// 丢包概率中时延分量的权重。
    pub delay_weight: f64,
    /// Target queueing delay.
    /// 目标排队时延。
    pub target_delay: Duration,
    /// Target load factor as a fraction of link capacity.
    /// 目标负载因子，占链路容量的比例。
    pub target_load_ratio: f64,
    /// Exponent applied to both normalized signals.
    /// 作用于两个归一化信号的指数。
    pub probability_exponent: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            mode: QueueMode::Packets,
            mean_packet_size: 500,
            queue_limit: 25,
            queue_weight: 0.002,
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bandwidth: DataRate::from_bps(1_500_000), // 1.5 Mbps
            delay: Duration::from_millis(20),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            recompute_interval: Duration::from_millis(2),
            rate_weight: 0.998,
            delay_weight: 0.75,
            target_delay: Duration::from_secs(4),
            target_load_ratio: 0.95,
            probability_exponent: 3,
        }
    }
}

impl Config {
    /// Checks every parameter against its permitted range.
    ///
    /// 检查每个参数是否在允许的范围内。
    pub fn validate(&self) -> Result<()> {
        let q = &self.queue;
        let c = &self.control;

        ensure(q.mean_packet_size > 0, "mean_packet_size", "must be positive")?;
        ensure(q.queue_limit > 0, "queue_limit", "must be positive")?;
        ensure(
            q.queue_weight > 0.0 && q.queue_weight <= 1.0,
            "queue_weight",
            "must be in (0, 1]",
        )?;
        ensure(self.link.bandwidth.bps() > 0, "link_bandwidth", "must be positive")?;
        ensure(
            !c.recompute_interval.is_zero(),
            "recompute_interval",
            "must be positive",
        )?;
        ensure(
            (0.0..=1.0).contains(&c.rate_weight),
            "rate_weight",
            "must be in [0, 1]",
        )?;
        ensure(
            (0.0..=1.0).contains(&c.delay_weight),
            "delay_weight",
            "must be in [0, 1]",
        )?;
        ensure(!c.target_delay.is_zero(), "target_delay", "must be positive")?;
        ensure(
            c.target_load_ratio > 0.0 && c.target_load_ratio <= 1.0,
            "target_load_ratio",
            "must be in (0, 1]",
        )?;
        ensure(
            c.probability_exponent >= 1,
            "probability_exponent",
            "must be at least 1",
        )?;
        Ok(())
    }
}

fn ensure(condition: bool, name: &'static str, reason: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.queue.mode, QueueMode::Packets);
        assert_eq!(config.queue.mean_packet_size, 500);
        assert_eq!(config.queue.queue_limit, 25);
        assert_eq!(config.queue.queue_weight, 0.002);
        assert_eq!(config.link.bandwidth.bps(), 1_500_000);
        assert_eq!(config.link.delay, Duration::from_millis(20));
        assert_eq!(config.control.recompute_interval, Duration::from_millis(2));
        assert_eq!(config.control.rate_weight, 0.998);
        assert_eq!(config.control.delay_weight, 0.75);
        assert_eq!(config.control.target_delay, Duration::from_secs(4));
        assert_eq!(config.control.target_load_ratio, 0.95);
        assert_eq!(config.control.probability_exponent, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_weights() {
        let mut config = Config::default();
        config.queue.queue_weight = 0.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "queue_weight", .. })
        ));

        let mut config = Config::default();
        config.control.delay_weight = 1.5;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "delay_weight", .. })
        ));

        let mut config = Config::default();
        config.control.target_load_ratio = 0.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "target_load_ratio", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_sizes_and_durations() {
        let mut config = Config::default();
        config.queue.mean_packet_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.control.recompute_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.control.probability_exponent = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.link.bandwidth = DataRate::from_bps(0);
        assert!(config.validate().is_err());
    }
}
