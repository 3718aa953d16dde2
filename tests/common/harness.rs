//! tests/common/harness.rs
use ldc_aqm::{
    config::Config,
    qdisc::LdcBuilder,
    queue::DropTailQueue,
    random::UniformSource,
    LdcQueueDisc,
};
use std::sync::Once;
use tokio::time::Instant;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "ldc_aqm=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .init();
    });
}

/// A random source that replays a fixed script of draws, cycling at the end.
#[derive(Debug, Clone)]
pub struct ScriptedUniform {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedUniform {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "script needs at least one draw");
        Self { draws, next: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }

    fn set_stream(&mut self, _stream: i64) -> i64 {
        self.next = 0;
        1
    }
}

/// Builds an LDC queue disc with a drop-tail queue and scripted draws.
pub fn build_scripted(
    config: Config,
    rng: ScriptedUniform,
    now: Instant,
) -> LdcQueueDisc<DropTailQueue, ScriptedUniform> {
    init_tracing();
    LdcBuilder::<DropTailQueue, _>::new(config)
        .random_source(rng)
        .build(now)
        .unwrap()
}

/// A configuration whose drop probability follows the load signal alone,
/// linearly, with no smoothing of the arrival count.
pub fn load_only_config() -> Config {
    let mut config = Config::default();
    config.control.delay_weight = 0.0;
    config.control.rate_weight = 1.0;
    config.control.probability_exponent = 1;
    config
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
