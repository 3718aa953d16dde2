//! 周期性重算定时器
//! Periodic recompute timer
//!
//! 队列规则拥有一个且仅一个重算定时器。定时器在初始化时被装备，每次到期后
//! 由其所有者重新装备，并在拆除时恰好取消一次。到期后的重新装备使截止时间保持在
//! `start + k * interval` 网格上，与观察到到期的延迟无关。
//!
//! A queue disc owns exactly one recompute timer. The timer is armed at
//! initialization, re-armed by its owner after each expiry, and cancelled
//! exactly once at teardown. Re-arming after an expiry keeps deadlines on the
//! `start + k * interval` grid, however late the expiry was observed.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// 定时器状态
/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// 尚未装备
    /// Not armed yet
    Idle,
    /// 已装备，将在截止时间到期
    /// Armed, expires at the deadline
    Armed(Instant),
    /// 已在给定截止时间到期，等待重新装备
    /// Expired at the given deadline, waiting to be re-armed
    Expired(Instant),
    /// 已取消，不能再装备
    /// Cancelled, can no longer be armed
    Cancelled,
}

/// An owned, cancellable handle to the periodic recompute event.
///
/// 周期性重算事件的自有、可取消句柄。
#[derive(Debug)]
pub struct RecomputeTimer {
    interval: Duration,
    state: TimerState,
    expirations: u64,
}

impl RecomputeTimer {
    /// 创建一个未装备的定时器
    /// Create an unarmed timer
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: TimerState::Idle,
            expirations: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// 在 `now` 之后一个周期装备定时器。已取消的定时器返回 `false`。
    /// Arm the timer one interval after `now`. Returns `false` once cancelled.
    pub fn schedule_after(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Cancelled {
            warn!("Attempted to arm a cancelled recompute timer");
            return false;
        }
        let deadline = now + self.interval;
        self.state = TimerState::Armed(deadline);
        trace!(?deadline, "Recompute timer armed");
        true
    }

    /// 从上一次到期的截止时间起按整周期推进，跳过已经错过的时隙。
    /// 定时器尚未到期时退化为 `schedule_after(now)`。
    ///
    /// Advance from the last expired deadline by whole intervals, skipping
    /// slots that are already in the past. Falls back to `schedule_after(now)`
    /// when the timer has not expired.
    pub fn schedule_next(&mut self, now: Instant) -> bool {
        let TimerState::Expired(last) = self.state else {
            return self.schedule_after(now);
        };

        let mut deadline = last + self.interval;
        if deadline <= now {
            let behind = now.saturating_duration_since(last);
            let steps = behind.as_nanos() / self.interval.as_nanos().max(1) + 1;
            let steps = u32::try_from(steps).unwrap_or(u32::MAX);
            let Some(offset) = self.interval.checked_mul(steps) else {
                return self.schedule_after(now);
            };
            deadline = last + offset;
            debug!(skipped = steps - 1, "Recompute timer fell behind, skipping missed slots");
        }

        self.state = TimerState::Armed(deadline);
        trace!(?deadline, "Recompute timer re-armed");
        true
    }

    /// 当前截止时间（如果已装备）
    /// Current deadline, if armed
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed(deadline) => Some(deadline),
            _ => None,
        }
    }

    /// 如果截止时间已到，将定时器标记为到期并返回 `true`。
    /// If the deadline has passed, mark the timer expired and return `true`.
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Armed(deadline) if deadline <= now => {
                self.state = TimerState::Expired(deadline);
                self.expirations += 1;
                true
            }
            _ => false,
        }
    }

    /// 取消定时器。第一次调用返回 `true`，之后的调用返回 `false`。
    /// Cancel the timer. The first call returns `true`, later calls return `false`.
    pub fn cancel(&mut self) -> bool {
        if self.state == TimerState::Cancelled {
            warn!("Recompute timer already cancelled");
            return false;
        }
        self.state = TimerState::Cancelled;
        trace!(expirations = self.expirations, "Recompute timer cancelled");
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TimerState::Cancelled
    }

    /// 定时器已到期的次数
    /// Number of times the timer has expired
    pub fn expirations(&self) -> u64 {
        self.expirations
    }
}
