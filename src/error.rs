//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use crate::packet::QueueMode;
use thiserror::Error;

/// The primary error type for the LDC queue discipline library.
/// LDC 队列规则库的主要错误类型。
///
/// Packet drops are not errors. They are reported through
/// [`Verdict`](crate::qdisc::Verdict) and the drop statistics.
///
/// 丢包不是错误，它们通过 `Verdict` 和丢包统计报告。
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is outside its permitted range.
    /// 配置值超出了允许的范围。
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Child scheduling classes were attached to the queue disc.
    /// 队列规则上附加了子调度类。
    #[error("LDC queue disc cannot have classes (found {0})")]
    ClassesNotSupported(usize),

    /// Packet filters were attached to the queue disc.
    /// 队列规则上附加了包过滤器。
    #[error("LDC queue disc cannot have packet filters (found {0})")]
    PacketFiltersNotSupported(usize),

    /// The queue disc needs exactly one internal queue.
    /// 队列规则恰好需要一个内部队列。
    #[error("LDC queue disc needs 1 internal queue, found {0}")]
    InternalQueueCount(usize),

    /// The internal queue counts in a different unit than the queue disc.
    /// 内部队列的计量单位与队列规则不一致。
    #[error("internal queue mode {queue:?} does not match queue disc mode {disc:?}")]
    QueueModeMismatch { disc: QueueMode, queue: QueueMode },

    /// The internal queue cannot hold as much as the queue disc limit.
    /// 内部队列的容量小于队列规则的限制。
    #[error("internal queue capacity {capacity} is less than the queue disc limit {limit}")]
    InternalQueueTooSmall { capacity: u32, limit: u32 },

    /// A data rate string could not be parsed.
    /// 无法解析数据速率字符串。
    #[error("invalid data rate `{0}`")]
    InvalidDataRate(String),

    /// The task hosting the queue disc has shut down.
    /// 承载队列规则的任务已关闭。
    #[error("queue disc task has been shut down")]
    EngineShutdown,
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
