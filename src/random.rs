//! 为早期丢包试验提供均匀随机数源。
//! Uniform random sources for the early-drop trial.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// A source of uniformly distributed values in `[0, 1)`.
///
/// 产生 `[0, 1)` 区间均匀分布值的随机源。
pub trait UniformSource: std::fmt::Debug + Send + 'static {
    /// Draws the next value in `[0, 1)`.
    /// 抽取下一个 `[0, 1)` 区间的值。
    fn next_uniform(&mut self) -> f64;

    /// Pins the source to a fixed stream so runs are reproducible.
    /// Returns the number of stream indices consumed.
    ///
    /// 将随机源固定到某个流上，使运行可复现。返回消耗的流索引数量。
    fn set_stream(&mut self, stream: i64) -> i64;
}

/// A `StdRng` backed source that reseeds deterministically per stream.
///
/// 基于 `StdRng` 的随机源，按流确定性地重新播种。
#[derive(Debug)]
pub struct StreamRng {
    rng: StdRng,
    stream: Option<i64>,
}

impl StreamRng {
    /// Creates a source seeded from the operating system.
    /// 创建一个由操作系统播种的随机源。
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            stream: None,
        }
    }

    /// Creates a source already pinned to `stream`.
    /// 创建一个已固定到 `stream` 的随机源。
    pub fn with_stream(stream: i64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(stream as u64),
            stream: Some(stream),
        }
    }

    pub fn stream(&self) -> Option<i64> {
        self.stream
    }
}

impl Default for StreamRng {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for StreamRng {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn set_stream(&mut self, stream: i64) -> i64 {
        self.rng = StdRng::seed_from_u64(stream as u64);
        self.stream = Some(stream);
        debug!(stream, "Random stream assigned");
        1
    }
}
