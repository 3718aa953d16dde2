//! 队列规则任务
//! Queue disc task
//!
//! 该模块将一个队列规则托管在单个 tokio 任务中。任务串行处理来自句柄的命令和
//! 周期性重算定时器，因此同一实例上的两个入口永远不会并发执行。
//!
//! This module hosts one queue disc in a single tokio task. The task serializes
//! handle commands and the periodic recompute timer, so two entry points of the
//! same instance never run concurrently.

mod command;
mod handle;

pub use command::QueueDiscCommand;
pub use handle::QueueDiscHandle;

use crate::{
    config::Config,
    error::Result,
    qdisc::{LdcQueueDisc, QueueDisc},
    queue::DropTailQueue,
    random::StreamRng,
};
use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tracing::{debug, info};

/// 命令通道容量
/// Command channel capacity
const COMMAND_CHANNEL_CAPACITY: usize = 128;

/// The actor that owns a queue disc and drives its timer.
///
/// 拥有队列规则并驱动其定时器的 actor。
pub(crate) struct QueueDiscActor<D: QueueDisc> {
    disc: D,
    command_rx: mpsc::Receiver<QueueDiscCommand<D>>,
}

impl<D: QueueDisc> QueueDiscActor<D> {
    pub(crate) fn new(disc: D, command_rx: mpsc::Receiver<QueueDiscCommand<D>>) -> Self {
        Self { disc, command_rx }
    }

    /// Runs the actor's main event loop.
    ///
    /// 运行 actor 的主事件循环。
    pub(crate) async fn run(mut self) {
        loop {
            let deadline = self.disc.next_timeout();

            tokio::select! {
                biased;

                // 1. Periodic recomputation.
                // 1. 周期性重算。
                _ = wait_for(deadline) => {
                    self.disc.poll_timeout(Instant::now());
                }
                // 2. Commands from handles.
                // 2. 来自句柄的命令。
                command = self.command_rx.recv() => {
                    let Some(command) = command else {
                        debug!("All queue disc handles dropped");
                        self.disc.dispose();
                        break;
                    };
                    if !self.handle_command(command) {
                        break;
                    }
                }
            }
        }

        info!(
            algorithm = self.disc.algorithm_name(),
            stats = %self.disc.stats(),
            "Queue disc task stopped"
        );
    }

    /// Handles one command. Returns `false` once the actor should stop.
    ///
    /// 处理一条命令。当 actor 应当停止时返回 `false`。
    fn handle_command(&mut self, command: QueueDiscCommand<D>) -> bool {
        match command {
            QueueDiscCommand::Enqueue { item, response_tx } => {
                let _ = response_tx.send(self.disc.enqueue(item));
            }
            QueueDiscCommand::Dequeue { response_tx } => {
                let _ = response_tx.send(self.disc.dequeue(Instant::now()));
            }
            QueueDiscCommand::Peek { response_tx } => {
                let _ = response_tx.send(self.disc.peek().cloned());
            }
            QueueDiscCommand::Stats { response_tx } => {
                let _ = response_tx.send(self.disc.stats());
            }
            QueueDiscCommand::Snapshot { response_tx } => {
                let _ = response_tx.send(self.disc.snapshot());
            }
            QueueDiscCommand::AssignStreams { stream, response_tx } => {
                let _ = response_tx.send(self.disc.assign_streams(stream));
            }
            QueueDiscCommand::Shutdown { response_tx } => {
                let _ = response_tx.send(self.disc.dispose());
                return false;
            }
        }
        true
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// 在新任务中启动队列规则
/// Start a queue disc in a new task
pub fn spawn_queue_disc<D: QueueDisc>(disc: D) -> QueueDiscHandle<D> {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let algorithm = disc.algorithm_name();
    let actor = QueueDiscActor::new(disc, command_rx);

    tokio::spawn(actor.run());

    info!(algorithm, "Queue disc task started");
    QueueDiscHandle::new(command_tx)
}

/// 使用尾丢弃内部队列构建并启动 LDC 队列规则
/// Build and start an LDC queue disc with a drop-tail internal queue
pub fn start_ldc_queue_disc(
    config: Config,
) -> Result<QueueDiscHandle<LdcQueueDisc<DropTailQueue, StreamRng>>> {
    let disc = LdcQueueDisc::builder(config).build(Instant::now())?;
    Ok(spawn_queue_disc(disc))
}
