//! The packet module, containing the queued item, size units and link rates.
//! packet 模块，包含队列条目、大小单位和链路速率的定义。

mod item;
mod rate;
mod size;

pub use item::QueueItem;
pub use rate::DataRate;
pub use size::{QueueMode, QueueSize};
