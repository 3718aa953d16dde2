//! LDC 队列规则构建器
//! LDC queue disc builder
//!
//! 构建器收集队列规则的组成部分，并在运行前校验：不能有子类、不能有包过滤器、
//! 恰好一个内部队列（缺失时自动创建），且内部队列的单位和容量与配置一致。
//!
//! The builder collects the parts of a queue disc and validates them before it
//! may run: no child classes, no packet filters, exactly one internal queue
//! (created on demand), and an internal queue whose unit and capacity agree
//! with the configuration.

use super::{ldc::LdcQueueDisc, traits::QueueDisc};
use crate::{
    config::Config,
    error::{Error, Result},
    packet::QueueSize,
    queue::{DropTailQueue, PacketQueue},
    random::{StreamRng, UniformSource},
};
use tokio::time::Instant;
use tracing::{debug, error};

/// Builder for [`LdcQueueDisc`].
///
/// [`LdcQueueDisc`] 的构建器。
#[derive(Debug)]
pub struct LdcBuilder<Q: PacketQueue, R: UniformSource> {
    config: Config,
    internal_queues: Vec<Q>,
    classes: Vec<String>,
    packet_filters: Vec<String>,
    rng: R,
}

impl LdcQueueDisc<DropTailQueue, StreamRng> {
    /// 使用尾丢弃内部队列和操作系统播种的随机源创建构建器
    /// Create a builder with a drop-tail internal queue and an OS-seeded random source
    pub fn builder(config: Config) -> LdcBuilder<DropTailQueue, StreamRng> {
        LdcBuilder::new(config)
    }
}

impl<Q: PacketQueue> LdcBuilder<Q, StreamRng> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            internal_queues: Vec::new(),
            classes: Vec::new(),
            packet_filters: Vec::new(),
            rng: StreamRng::new(),
        }
    }
}

impl<Q: PacketQueue, R: UniformSource> LdcBuilder<Q, R> {
    /// 添加内部队列
    /// Add an internal queue
    pub fn internal_queue(mut self, queue: Q) -> Self {
        self.internal_queues.push(queue);
        self
    }

    /// 附加子调度类。LDC 不支持子类，构建时会失败。
    /// Attach a child class. LDC does not support classes, so building will fail.
    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.classes.push(name.into());
        self
    }

    /// 附加包过滤器。LDC 不支持过滤器，构建时会失败。
    /// Attach a packet filter. LDC does not support filters, so building will fail.
    pub fn packet_filter(mut self, name: impl Into<String>) -> Self {
        self.packet_filters.push(name.into());
        self
    }

    /// 替换随机源
    /// Replace the random source
    pub fn random_source<R2: UniformSource>(self, rng: R2) -> LdcBuilder<Q, R2> {
        LdcBuilder {
            config: self.config,
            internal_queues: self.internal_queues,
            classes: self.classes,
            packet_filters: self.packet_filters,
            rng,
        }
    }

    /// 校验配置并初始化参数，返回可运行的队列规则
    /// Validate the configuration, initialize parameters and return a runnable queue disc
    pub fn build(mut self, now: Instant) -> Result<LdcQueueDisc<Q, R>> {
        self.config.validate()?;

        if !self.classes.is_empty() {
            error!(classes = ?self.classes, "LdcQueueDisc cannot have classes");
            return Err(Error::ClassesNotSupported(self.classes.len()));
        }

        if !self.packet_filters.is_empty() {
            error!(filters = ?self.packet_filters, "LdcQueueDisc cannot have packet filters");
            return Err(Error::PacketFiltersNotSupported(self.packet_filters.len()));
        }

        if self.internal_queues.is_empty() {
            let max_size = QueueSize {
                mode: self.config.queue.mode,
                value: self.config.queue.queue_limit,
            };
            debug!(%max_size, "Creating default internal queue");
            self.internal_queues.push(Q::with_max_size(max_size));
        }

        if self.internal_queues.len() != 1 {
            error!(
                count = self.internal_queues.len(),
                "LdcQueueDisc needs 1 internal queue"
            );
            return Err(Error::InternalQueueCount(self.internal_queues.len()));
        }

        let Some(queue) = self.internal_queues.pop() else {
            return Err(Error::InternalQueueCount(0));
        };

        let mut disc = LdcQueueDisc::from_parts(self.config, queue, self.rng, now);
        disc.check_config()?;
        disc.initialize_params(now);
        Ok(disc)
    }
}
