//! 队列规则任务句柄
//! Queue disc task handle
//!
//! 本模块包含队列规则任务的客户端句柄，提供了与任务通信的异步接口。
//!
//! This module contains the client handle for the queue disc task, providing
//! async interfaces for communicating with the task.

use super::command::QueueDiscCommand;
use crate::{
    error::{Error, Result},
    packet::QueueItem,
    qdisc::{QueueDisc, Verdict},
};
use tokio::sync::{mpsc, oneshot};

/// 队列规则任务的句柄
/// Handle for a queue disc task
pub struct QueueDiscHandle<D: QueueDisc> {
    /// 命令发送通道
    /// Command sender channel
    command_tx: mpsc::Sender<QueueDiscCommand<D>>,
}

impl<D: QueueDisc> Clone for QueueDiscHandle<D> {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
        }
    }
}

impl<D: QueueDisc> QueueDiscHandle<D> {
    pub(crate) fn new(command_tx: mpsc::Sender<QueueDiscCommand<D>>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(
        &self,
        make_command: impl FnOnce(oneshot::Sender<T>) -> QueueDiscCommand<D>,
    ) -> Result<T> {
        let (response_tx, response_rx) = oneshot::channel();

        self.command_tx
            .send(make_command(response_tx))
            .await
            .map_err(|_| Error::EngineShutdown)?;

        response_rx.await.map_err(|_| Error::EngineShutdown)
    }

    /// 提交一个到达的包
    /// Submit an arriving packet
    pub async fn enqueue(&self, item: QueueItem) -> Result<Verdict> {
        self.request(|response_tx| QueueDiscCommand::Enqueue { item, response_tx })
            .await
    }

    /// 取出队首的包
    /// Remove the head packet
    pub async fn dequeue(&self) -> Result<Option<QueueItem>> {
        self.request(|response_tx| QueueDiscCommand::Dequeue { response_tx })
            .await
    }

    /// 查看队首的包
    /// Look at the head packet
    pub async fn peek(&self) -> Result<Option<QueueItem>> {
        self.request(|response_tx| QueueDiscCommand::Peek { response_tx })
            .await
    }

    /// 获取统计信息
    /// Get statistics
    pub async fn stats(&self) -> Result<D::Stats> {
        self.request(|response_tx| QueueDiscCommand::Stats { response_tx })
            .await
    }

    /// 获取估计器快照
    /// Get an estimator snapshot
    pub async fn snapshot(&self) -> Result<D::Snapshot> {
        self.request(|response_tx| QueueDiscCommand::Snapshot { response_tx })
            .await
    }

    /// 为随机源分配固定流，返回消耗的流数量
    /// Assign a fixed random stream, returns the number of streams consumed
    pub async fn assign_streams(&self, stream: i64) -> Result<i64> {
        self.request(|response_tx| QueueDiscCommand::AssignStreams {
            stream,
            response_tx,
        })
        .await
    }

    /// 关闭任务。如果本次调用取消了定时器，返回 `true`。
    /// Shut the task down. Returns `true` if this call cancelled the timer.
    pub async fn shutdown(&self) -> Result<bool> {
        self.request(|response_tx| QueueDiscCommand::Shutdown { response_tx })
            .await
    }

    /// 任务是否已经停止
    /// Whether the task has stopped
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}
