#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the load/delay controlled (LDC) active queue management library.
//! 基于负载和时延控制（LDC）的主动队列管理库的根。

pub mod config;
pub mod error;
pub mod packet;
pub mod queue;
pub mod random;
pub mod timer;

pub mod actor;
pub mod qdisc;

pub use actor::{QueueDiscHandle, spawn_queue_disc, start_ldc_queue_disc};
pub use config::Config;
pub use error::{Error, Result};
pub use qdisc::{DropReason, LdcQueueDisc, QueueDisc, Verdict};
