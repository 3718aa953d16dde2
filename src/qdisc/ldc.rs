//! LDC队列规则 - 基于负载和时延的早期丢包
//! LDC queue disc - load and delay controlled early drop
//!
//! 职责：
//! - 周期性地更新负载与队列长度的指数加权平均
//! - 将时延信号与负载信号混合为丢包概率
//! - 对每个到达的包做出接纳或丢弃的决策
//!
//! Responsibilities:
//! - Periodically update the load and queue length EWMAs
//! - Blend the delay and load signals into a drop probability
//! - Admit or drop every arriving packet

use super::{
    estimator::{
        blend_drop_probability, early_drop_trial, estimate_queue_average, idle_packet_count,
        normalized_signal,
    },
    stats::{EstimatorSnapshot, LdcStats},
    traits::{DropReason, QueueDisc, Verdict},
};
use crate::{
    config::Config,
    error::{Error, Result},
    packet::{QueueItem, QueueMode},
    queue::PacketQueue,
    random::UniformSource,
    timer::RecomputeTimer,
};
use tokio::time::Instant;
use tracing::{debug, error, info, trace};

/// 由估计器和接纳决策维护的动态状态
/// Dynamic state maintained by the estimator and the admission decision
#[derive(Debug, Clone, Copy)]
struct DynamicState {
    /// 平均队列长度
    /// Average queue length
    q_avg: f64,
    /// 每个周期到达包数的平均值
    /// Average number of arrivals per interval
    n_pkt: f64,
    /// 负载因子
    /// Load factor
    ratio: f64,
    /// 早期丢包概率
    /// Early drop probability
    v_prob: f64,
    idle: bool,
    /// 当前空闲期的开始时间
    /// Start of the current idle period
    idle_since: Instant,
    /// 自上次重算以来的到达包数
    /// Arrivals since the last recomputation
    n_income: u32,
}

impl DynamicState {
    fn reset(now: Instant) -> Self {
        Self {
            q_avg: 0.0,
            n_pkt: 0.0,
            ratio: 0.0,
            v_prob: 0.0,
            idle: true,
            idle_since: now,
            n_income: 0,
        }
    }
}

/// 早期丢包类型
/// Early drop classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropType {
    None,
    Forced,
    Unforced,
}

/// LDC队列规则
/// LDC queue disc
#[derive(Debug)]
pub struct LdcQueueDisc<Q: PacketQueue, R: UniformSource> {
    config: Config,
    queue: Q,
    rng: R,
    timer: RecomputeTimer,

    /// 包时间常数（包/秒）
    /// Packet time constant in packets/second
    ptc: f64,
    /// 以配置单位表示的目标队列长度
    /// Target queue length in the configured unit
    q_target: f64,

    state: DynamicState,
    stats: LdcStats,
}

impl<Q: PacketQueue, R: UniformSource> LdcQueueDisc<Q, R> {
    /// Assembles a queue disc around an already validated internal queue.
    /// Parameters are not initialized yet.
    ///
    /// 围绕已校验的内部队列组装队列规则。参数尚未初始化。
    pub(crate) fn from_parts(config: Config, queue: Q, rng: R, now: Instant) -> Self {
        let timer = RecomputeTimer::new(config.control.recompute_interval);
        Self {
            config,
            queue,
            rng,
            timer,
            ptc: 0.0,
            q_target: 0.0,
            state: DynamicState::reset(now),
            stats: LdcStats::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> QueueMode {
        self.config.queue.mode
    }

    pub fn queue_limit(&self) -> u32 {
        self.config.queue.queue_limit
    }

    /// The internal queue occupancy in the configured unit.
    ///
    /// 以配置单位表示的内部队列占用量。
    pub fn queue_size(&self) -> u32 {
        self.queue.occupancy(self.config.queue.mode)
    }

    pub fn internal_queue(&self) -> &Q {
        &self.queue
    }

    pub fn timer(&self) -> &RecomputeTimer {
        &self.timer
    }

    /// Periodic recomputation of the load average, the queue average and the
    /// drop probability. Re-arms the recompute timer one interval after the
    /// deadline that expired, so late wake-ups do not stretch the period.
    ///
    /// Bandwidth-dependent constants derived at initialization are not
    /// refreshed here, even if the link rate has since changed.
    ///
    /// 周期性地重算负载平均值、队列平均值和丢包概率，并从已到期的截止时间起
    /// 重新装备重算定时器，因此唤醒延迟不会拉长周期。
    /// 初始化时推导的与带宽相关的常量不会在此刷新。
    pub fn on_timeout(&mut self, now: Instant) {
        let control = &self.config.control;
        let n_queued = self.queue_size();

        let m = if self.state.idle {
            let idle_for = now.saturating_duration_since(self.state.idle_since);
            self.state.idle = false;
            let m = idle_packet_count(self.ptc, idle_for.as_secs_f64());
            debug!(idle_ms = idle_for.as_millis(), m, "LDC queue disc was idle");
            m
        } else {
            0
        };

        // overload factor
        self.state.n_pkt = (1.0 - control.rate_weight) * self.state.n_pkt
            + control.rate_weight * f64::from(self.state.n_income);
        self.state.n_income = 0;
        let interval_capacity = control.recompute_interval.as_secs_f64() * self.ptc;
        self.state.ratio = self.state.n_pkt / interval_capacity;

        self.state.q_avg = estimate_queue_average(
            n_queued,
            m.saturating_add(1),
            self.state.q_avg,
            self.config.queue.queue_weight,
        );

        let q_norm = normalized_signal(
            self.state.q_avg,
            self.q_target,
            control.probability_exponent,
        );
        let r_norm = normalized_signal(
            self.state.ratio,
            control.target_load_ratio,
            control.probability_exponent,
        );
        self.state.v_prob = blend_drop_probability(control.delay_weight, q_norm, r_norm);

        debug!(
            n_queued,
            q_avg = self.state.q_avg,
            n_pkt = self.state.n_pkt,
            ratio = self.state.ratio,
            v_prob = self.state.v_prob,
            "LDC drop probability recomputed"
        );

        self.timer.schedule_next(now);
    }

    fn exceeds_limit(&self, n_queued: u32, item: &QueueItem) -> bool {
        let limit = self.config.queue.queue_limit;
        match self.config.queue.mode {
            QueueMode::Packets => n_queued >= limit,
            QueueMode::Bytes => n_queued.saturating_add(item.size()) > limit,
        }
    }

    #[cfg(test)]
    pub(crate) fn random_source(&self) -> &R {
        &self.rng
    }

    #[cfg(test)]
    pub(crate) fn set_drop_probability(&mut self, p: f64) {
        self.state.v_prob = p;
    }

    #[cfg(test)]
    pub(crate) fn set_queue_average(&mut self, q_avg: f64) {
        self.state.q_avg = q_avg;
    }
}

impl<Q: PacketQueue, R: UniformSource> QueueDisc for LdcQueueDisc<Q, R> {
    type Stats = LdcStats;
    type Snapshot = EstimatorSnapshot;

    fn check_config(&self) -> Result<()> {
        let mode = self.config.queue.mode;
        let limit = self.config.queue.queue_limit;
        let max_size = self.queue.max_size();

        if max_size.mode != mode {
            error!(
                disc = ?mode,
                queue = ?max_size.mode,
                "The mode of the provided queue does not match the mode set on the LDC queue disc"
            );
            return Err(Error::QueueModeMismatch {
                disc: mode,
                queue: max_size.mode,
            });
        }

        if max_size.value < limit {
            error!(
                capacity = max_size.value,
                limit, "The size of the internal queue is less than the queue disc limit"
            );
            return Err(Error::InternalQueueTooSmall {
                capacity: max_size.value,
                limit,
            });
        }

        Ok(())
    }

    fn initialize_params(&mut self, now: Instant) {
        let queue = &self.config.queue;
        let bitrate = self.config.link.bandwidth.bps() as f64;

        self.ptc = bitrate / (8.0 * f64::from(queue.mean_packet_size));
        let target_packets = self.config.control.target_delay.as_secs_f64() * self.ptc;
        self.q_target = match queue.mode {
            QueueMode::Packets => target_packets,
            QueueMode::Bytes => target_packets * f64::from(queue.mean_packet_size),
        };

        self.state = DynamicState::reset(now);
        self.stats = LdcStats::default();
        self.timer.schedule_after(now);

        info!(
            ptc = self.ptc,
            q_target = self.q_target,
            q_w = queue.queue_weight,
            link_delay_ms = self.config.link.delay.as_millis(),
            "Initializing LDC params"
        );
    }

    fn enqueue(&mut self, item: QueueItem) -> Verdict {
        self.state.n_income = self.state.n_income.saturating_add(1);

        let n_queued = self.queue_size();
        trace!(
            n_queued,
            bytes = self.queue.n_bytes(),
            packets = self.queue.n_packets(),
            q_avg = self.state.q_avg,
            "Enqueue"
        );

        let mut drop_type = DropType::None;
        if early_drop_trial(&mut self.rng, self.state.v_prob) {
            drop_type = DropType::Unforced;
        }
        if self.exceeds_limit(n_queued, &item) {
            drop_type = DropType::Forced;
        }

        match drop_type {
            DropType::Unforced => {
                self.stats.early_drop_count += 1;
                debug!(v_prob = self.state.v_prob, size = item.size(), "Dropping due to prob mark");
                Verdict::Dropped(DropReason::Unforced)
            }
            DropType::Forced => {
                self.stats.capacity_drop_count += 1;
                self.stats.limit_drop_count += 1;
                debug!(n_queued, size = item.size(), "Dropping due to queue full");
                Verdict::Dropped(DropReason::Forced)
            }
            DropType::None => {
                // A rejection here is counted by the internal queue itself.
                if self.queue.enqueue(item) {
                    Verdict::Accepted
                } else {
                    Verdict::Dropped(DropReason::QueueFull)
                }
            }
        }
    }

    fn dequeue(&mut self, now: Instant) -> Option<QueueItem> {
        if self.queue.is_empty() {
            trace!("Queue empty");
            self.state.idle = true;
            self.state.idle_since = now;
            return None;
        }

        self.state.idle = false;
        let item = self.queue.dequeue();
        trace!(
            packets = self.queue.n_packets(),
            bytes = self.queue.n_bytes(),
            "Popped item"
        );
        item
    }

    fn peek(&self) -> Option<&QueueItem> {
        self.queue.peek()
    }

    fn next_timeout(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    fn poll_timeout(&mut self, now: Instant) -> bool {
        if self.timer.poll_expired(now) {
            self.on_timeout(now);
            true
        } else {
            false
        }
    }

    fn assign_streams(&mut self, stream: i64) -> i64 {
        self.rng.set_stream(stream)
    }

    fn stats(&self) -> LdcStats {
        self.stats
    }

    fn snapshot(&self) -> EstimatorSnapshot {
        EstimatorSnapshot {
            queue_average: self.state.q_avg,
            load_average: self.state.n_pkt,
            load_ratio: self.state.ratio,
            drop_probability: self.state.v_prob,
            idle: self.state.idle,
            idle_since: self.state.idle_since,
            interval_arrivals: self.state.n_income,
            service_rate: self.ptc,
            queue_target: self.q_target,
        }
    }

    fn dispose(&mut self) -> bool {
        self.timer.cancel()
    }

    fn algorithm_name(&self) -> &'static str {
        "ldc"
    }
}

impl<Q: PacketQueue, R: UniformSource> Drop for LdcQueueDisc<Q, R> {
    fn drop(&mut self) {
        if !self.timer.is_cancelled() {
            self.timer.cancel();
        }
    }
}
