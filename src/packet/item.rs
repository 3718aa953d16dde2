//! 队列中排队的条目。
//! The item held by a queue.

use bytes::Bytes;

/// A packet waiting in a queue: its wire size and an opaque payload.
///
/// 队列中等待的包：其线上大小和不透明的载荷。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    size: u32,
    payload: Bytes,
}

impl QueueItem {
    /// Creates an item whose size is the payload length.
    /// 创建一个大小等于载荷长度的条目。
    pub fn new(payload: Bytes) -> Self {
        let size = u32::try_from(payload.len()).unwrap_or(u32::MAX);
        Self { size, payload }
    }

    /// Creates an item with an explicit wire size, for headers the payload does not carry.
    /// 创建一个具有显式线上大小的条目，用于载荷中不包含的头部。
    pub fn with_size(size: u32, payload: Bytes) -> Self {
        Self { size, payload }
    }

    /// Creates a payload-less item of the given size.
    /// 创建一个给定大小、没有载荷的条目。
    pub fn sized(size: u32) -> Self {
        Self {
            size,
            payload: Bytes::new(),
        }
    }

    /// The size of the packet in bytes.
    /// 包的大小（字节）。
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
