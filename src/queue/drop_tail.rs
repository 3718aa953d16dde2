//! 尾丢弃 FIFO 队列。
//! A drop-tail FIFO queue.

use super::PacketQueue;
use crate::packet::{QueueItem, QueueMode, QueueSize};
use std::collections::VecDeque;
use tracing::trace;

/// A FIFO that drops an arriving item when it would exceed the bound.
///
/// 当到达的条目会超出界限时将其丢弃的 FIFO。
#[derive(Debug)]
pub struct DropTailQueue {
    items: VecDeque<QueueItem>,
    max_size: QueueSize,
    n_bytes: u32,
    dropped: u64,
}

impl DropTailQueue {
    pub fn new(max_size: QueueSize) -> Self {
        Self {
            items: VecDeque::new(),
            max_size,
            n_bytes: 0,
            dropped: 0,
        }
    }

    fn would_overflow(&self, item: &QueueItem) -> bool {
        match self.max_size.mode {
            QueueMode::Packets => self.n_packets() >= self.max_size.value,
            QueueMode::Bytes => {
                self.n_bytes.saturating_add(item.size()) > self.max_size.value
            }
        }
    }
}

impl PacketQueue for DropTailQueue {
    fn with_max_size(max_size: QueueSize) -> Self {
        Self::new(max_size)
    }

    fn max_size(&self) -> QueueSize {
        self.max_size
    }

    fn n_packets(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    fn n_bytes(&self) -> u32 {
        self.n_bytes
    }

    fn enqueue(&mut self, item: QueueItem) -> bool {
        if self.would_overflow(&item) {
            self.dropped += 1;
            trace!(
                size = item.size(),
                packets = self.n_packets(),
                bytes = self.n_bytes,
                "Drop-tail queue full, dropping item"
            );
            return false;
        }
        self.n_bytes = self.n_bytes.saturating_add(item.size());
        self.items.push_back(item);
        true
    }

    fn dequeue(&mut self) -> Option<QueueItem> {
        let item = self.items.pop_front()?;
        self.n_bytes = self.n_bytes.saturating_sub(item.size());
        Some(item)
    }

    fn peek(&self) -> Option<&QueueItem> {
        self.items.front()
    }

    fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_mode_bound() {
        let mut queue = DropTailQueue::new(QueueSize::packets(2));
        assert!(queue.enqueue(QueueItem::sized(100)));
        assert!(queue.enqueue(QueueItem::sized(100)));
        assert!(!queue.enqueue(QueueItem::sized(100)));
        assert_eq!(queue.n_packets(), 2);
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn test_byte_mode_bound() {
        let mut queue = DropTailQueue::new(QueueSize::bytes(1000));
        assert!(queue.enqueue(QueueItem::sized(600)));
        assert!(!queue.enqueue(QueueItem::sized(500)));
        assert!(queue.enqueue(QueueItem::sized(400)));
        assert_eq!(queue.n_bytes(), 1000);
        assert_eq!(queue.occupancy(QueueMode::Bytes), 1000);
        assert_eq!(queue.occupancy(QueueMode::Packets), 2);
    }

    #[test]
    fn test_byte_accounting_follows_dequeue() {
        let mut queue = DropTailQueue::new(QueueSize::bytes(10_000));
        queue.enqueue(QueueItem::sized(300));
        queue.enqueue(QueueItem::sized(700));
        assert_eq!(queue.n_bytes(), 1000);

        let head = queue.peek().map(QueueItem::size);
        assert_eq!(head, Some(300));

        assert_eq!(queue.dequeue().map(|i| i.size()), Some(300));
        assert_eq!(queue.n_bytes(), 700);
        assert_eq!(queue.dequeue().map(|i| i.size()), Some(700));
        assert_eq!(queue.n_bytes(), 0);
        assert!(queue.is_empty());
        assert!(queue.dequeue().is_none());
    }
}
