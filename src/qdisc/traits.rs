//! 队列规则抽象接口
//! Queue discipline abstract interfaces

use crate::{error::Result, packet::QueueItem};
use tokio::time::Instant;

/// 丢包原因
/// Drop reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// 概率性的早期丢包
    /// Probabilistic early drop
    Unforced,
    /// 超过队列硬限制的强制丢包
    /// Forced drop because the hard queue limit is reached
    Forced,
    /// 内部队列自身拒绝了该包
    /// The internal queue rejected the packet on its own
    QueueFull,
}

/// 入队决策结果
/// Enqueue decision result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 包已被放入内部队列
    /// The packet was stored in the internal queue
    Accepted,
    /// 包已被丢弃
    /// The packet was discarded
    Dropped(DropReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            Verdict::Accepted => None,
            Verdict::Dropped(reason) => Some(*reason),
        }
    }
}

/// 队列规则核心trait
/// Core queue discipline trait
///
/// Every entry point is synchronous and bounded. The host guarantees that
/// no two entry points run concurrently on the same instance.
///
/// 每个入口都是同步且有界的。宿主保证同一实例上不会有两个入口并发执行。
pub trait QueueDisc: std::fmt::Debug + Send + 'static {
    /// 统计信息类型
    /// Statistics type
    type Stats: Clone + std::fmt::Debug + std::fmt::Display + Send;

    /// 内省快照类型
    /// Introspection snapshot type
    type Snapshot: Clone + std::fmt::Debug + Send;

    /// 校验队列规则与其内部队列的一致性
    /// Validate the queue disc against its internal queue
    fn check_config(&self) -> Result<()>;

    /// 推导内部常量并重置所有动态状态
    /// Derive internal constants and reset all dynamic state
    fn initialize_params(&mut self, now: Instant);

    /// 对到达的包做出接纳或丢弃的决策
    /// Decide whether to admit or drop an arriving packet
    fn enqueue(&mut self, item: QueueItem) -> Verdict;

    /// 取出队首的包
    /// Remove the head packet
    fn dequeue(&mut self, now: Instant) -> Option<QueueItem>;

    /// 查看队首的包而不取出
    /// Look at the head packet without removing it
    fn peek(&self) -> Option<&QueueItem>;

    /// 下一次周期性重算的截止时间
    /// Deadline of the next periodic recomputation
    fn next_timeout(&self) -> Option<Instant>;

    /// 如果定时器已到期，执行周期性重算。返回是否执行了重算。
    /// Run the periodic recomputation if the timer expired. Returns whether it ran.
    fn poll_timeout(&mut self, now: Instant) -> bool;

    /// 为随机源分配固定的流
    /// Assign a fixed stream to the random source
    fn assign_streams(&mut self, stream: i64) -> i64;

    /// 获取统计信息
    /// Get statistics
    fn stats(&self) -> Self::Stats;

    /// 获取估计器状态快照
    /// Get a snapshot of the estimator state
    fn snapshot(&self) -> Self::Snapshot;

    /// 取消定时器并释放资源。只有第一次调用返回 `true`。
    /// Cancel the timer and release resources. Only the first call returns `true`.
    fn dispose(&mut self) -> bool;

    /// 获取算法名称
    /// Get algorithm name
    fn algorithm_name(&self) -> &'static str;
}
