//! 主动队列管理（AQM）队列规则
//! Active queue management (AQM) queue disciplines
//!
//! 职责：
//! - 定义通用的队列规则接口
//! - 实现基于负载和时延的 LDC 丢包决策
//! - 在运行前校验队列规则的组成
//!
//! Responsibilities:
//! - Define the common queue discipline interface
//! - Implement the load/delay controlled (LDC) drop decision
//! - Validate the queue disc composition before it runs

pub mod builder;
pub mod estimator;
pub mod ldc;
pub mod stats;
pub mod traits;


pub use builder::LdcBuilder;
pub use ldc::LdcQueueDisc;
pub use stats::{EstimatorSnapshot, LdcStats};
pub use traits::{DropReason, QueueDisc, Verdict};
