//! 定义了队列规则所依赖的 FIFO 存储接口。
//! Defines the FIFO store interface a queue disc relies on.

mod drop_tail;

pub use drop_tail::DropTailQueue;

use crate::packet::{QueueItem, QueueMode, QueueSize};

/// A bounded FIFO packet store.
///
/// The store keeps its own byte and packet accounting. Callers read the
/// occupancy from here instead of tracking it themselves.
///
/// 有界的 FIFO 包存储。
/// 存储自己维护字节和包计数，调用者从这里读取占用量，而不是自行追踪。
pub trait PacketQueue: std::fmt::Debug + Send + 'static {
    /// Creates an empty queue bounded by `max_size`.
    /// 创建一个以 `max_size` 为界的空队列。
    fn with_max_size(max_size: QueueSize) -> Self
    where
        Self: Sized;

    /// The unit this queue is bounded in.
    /// 此队列的界限单位。
    fn mode(&self) -> QueueMode {
        self.max_size().mode
    }

    /// The configured capacity.
    /// 配置的容量。
    fn max_size(&self) -> QueueSize;

    fn n_packets(&self) -> u32;

    fn n_bytes(&self) -> u32;

    /// Current occupancy measured in `mode`.
    /// 以 `mode` 衡量的当前占用量。
    fn occupancy(&self, mode: QueueMode) -> u32 {
        match mode {
            QueueMode::Bytes => self.n_bytes(),
            QueueMode::Packets => self.n_packets(),
        }
    }

    /// Appends an item. Returns `false` and counts a drop if the store is full.
    /// 追加一个条目。如果存储已满，返回 `false` 并记录一次丢弃。
    fn enqueue(&mut self, item: QueueItem) -> bool;

    fn dequeue(&mut self) -> Option<QueueItem>;

    fn peek(&self) -> Option<&QueueItem>;

    fn is_empty(&self) -> bool {
        self.n_packets() == 0
    }

    /// Number of items this store rejected on its own.
    /// 此存储自身拒绝的条目数。
    fn dropped(&self) -> u64;
}
