//! 队列大小的计量单位。
//! Units in which queue sizes are measured.

use std::fmt;

/// The unit in which a queue measures its occupancy and limit.
///
/// 队列衡量其占用量和限制的单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueMode {
    /// Occupancy is counted in bytes.
    /// 占用量以字节计数。
    Bytes,
    /// Occupancy is counted in packets.
    /// 占用量以包计数。
    #[default]
    Packets,
}

/// A queue size together with its unit.
///
/// 带单位的队列大小。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSize {
    pub mode: QueueMode,
    pub value: u32,
}

impl QueueSize {
    pub fn packets(value: u32) -> Self {
        Self {
            mode: QueueMode::Packets,
            value,
        }
    }

    pub fn bytes(value: u32) -> Self {
        Self {
            mode: QueueMode::Bytes,
            value,
        }
    }
}

impl fmt::Display for QueueSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            QueueMode::Bytes => write!(f, "{}B", self.value),
            QueueMode::Packets => write!(f, "{}p", self.value),
        }
    }
}
