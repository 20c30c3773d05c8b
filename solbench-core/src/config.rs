//! Sampling Configuration

use serde::{Deserialize, Serialize};

/// Default number of measured timing runs
pub const DEFAULT_NUM_RUNS: usize = 100;

/// Default number of discarded warm-up runs
pub const DEFAULT_WARMUP_RUNS: usize = 10;

/// Default number of memory samples
pub const DEFAULT_MEMORY_SAMPLES: usize = 10;

/// How many times the candidate is invoked in each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Measured timing runs
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,
    /// Warm-up runs before timing (results and timings discarded)
    #[serde(default = "default_warmup_runs")]
    pub warmup_runs: usize,
    /// Memory samples, one invocation each
    #[serde(default = "default_memory_samples")]
    pub memory_samples: usize,
    /// Pin the measuring thread to this CPU before timing
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            warmup_runs: DEFAULT_WARMUP_RUNS,
            memory_samples: DEFAULT_MEMORY_SAMPLES,
            pin_cpu: None,
        }
    }
}

fn default_num_runs() -> usize {
    DEFAULT_NUM_RUNS
}
fn default_warmup_runs() -> usize {
    DEFAULT_WARMUP_RUNS
}
fn default_memory_samples() -> usize {
    DEFAULT_MEMORY_SAMPLES
}
