//! 队列规则任务命令定义
//! Queue disc task command definitions
//!
//! 定义了句柄与队列规则任务之间的通信协议。每条命令都携带一个 oneshot
//! 发送端用于回复。
//!
//! Defines the protocol between handles and the queue disc task. Every command
//! carries a oneshot sender for the reply.

use crate::{
    packet::QueueItem,
    qdisc::{QueueDisc, Verdict},
};
use tokio::sync::oneshot;

/// 队列规则任务命令
/// Queue disc task commands
#[derive(Debug)]
pub enum QueueDiscCommand<D: QueueDisc> {
    /// 对到达的包做出接纳决策
    /// Run the admission decision for an arriving packet
    Enqueue {
        item: QueueItem,
        response_tx: oneshot::Sender<Verdict>,
    },
    /// 取出队首的包
    /// Remove the head packet
    Dequeue {
        response_tx: oneshot::Sender<Option<QueueItem>>,
    },
    /// 查看队首的包
    /// Look at the head packet
    Peek {
        response_tx: oneshot::Sender<Option<QueueItem>>,
    },
    /// 获取统计信息
    /// Get statistics
    Stats {
        response_tx: oneshot::Sender<D::Stats>,
    },
    /// 获取估计器快照
    /// Get an estimator snapshot
    Snapshot {
        response_tx: oneshot::Sender<D::Snapshot>,
    },
    /// 为随机源分配固定流
    /// Assign a fixed random stream
    AssignStreams {
        stream: i64,
        response_tx: oneshot::Sender<i64>,
    },
    /// 取消定时器并关闭任务
    /// Cancel the timer and shut the task down
    Shutdown {
        response_tx: oneshot::Sender<bool>,
    },
}
