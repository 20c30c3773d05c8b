//! Timing and Memory Samplers
//!
//! Both samplers invoke the candidate synchronously on the calling thread,
//! one invocation at a time, with identical arguments on every call. Any
//! error from the candidate aborts sampling and is returned as-is.
//!
//! There is no per-invocation deadline: a candidate that never returns
//! blocks the sampler indefinitely.

use crate::allocator::{TraceSession, tracer_installed};
use crate::candidate::{Arguments, Candidate, ExecutionError};
use crate::config::{BenchmarkConfig, DEFAULT_MEMORY_SAMPLES, DEFAULT_NUM_RUNS, DEFAULT_WARMUP_RUNS};
use crate::measure::{Timer, pin_to_cpu};
use crate::size::result_size;
use serde::{Deserialize, Serialize};
use std::hint::black_box;

/// One memory sample: traced bytes for a single invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMeasurement {
    /// Net bytes still allocated when the invocation returned
    pub current_bytes: u64,
    /// High-water mark of allocated bytes during the invocation
    pub peak_bytes: u64,
    /// Shallow size estimate of the returned value
    pub result_size: u64,
}

/// Records per-call wall-clock durations after a warm-up phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSampler {
    /// Measured runs
    pub num_runs: usize,
    /// Discarded warm-up runs
    pub warmup_runs: usize,
    /// Optional CPU to pin the thread to before timing
    pub pin_cpu: Option<usize>,
}

impl Default for TimingSampler {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_RUNS, DEFAULT_WARMUP_RUNS)
    }
}

impl TimingSampler {
    /// Create a sampler with the given run counts
    pub fn new(num_runs: usize, warmup_runs: usize) -> Self {
        Self {
            num_runs,
            warmup_runs,
            pin_cpu: None,
        }
    }

    /// Build from a [`BenchmarkConfig`]
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            num_runs: config.num_runs,
            warmup_runs: config.warmup_runs,
            pin_cpu: config.pin_cpu,
        }
    }

    /// Run warm-up, then exactly `num_runs` timed invocations.
    ///
    /// Returns one duration in seconds per timed invocation.
    pub fn run<C>(&self, candidate: &C, args: &Arguments) -> Result<Vec<f64>, ExecutionError>
    where
        C: Candidate + ?Sized,
    {
        if let Some(cpu) = self.pin_cpu {
            if let Err(e) = pin_to_cpu(cpu) {
                tracing::warn!(cpu, error = %e, "failed to pin thread, timing unpinned");
            }
        }

        // Warmup phase - let caches and lazy initialization settle
        for _ in 0..self.warmup_runs {
            black_box(candidate.call(args)?);
        }

        candidate.reclaim();

        let mut samples = Vec::with_capacity(self.num_runs);
        for _ in 0..self.num_runs {
            let timer = Timer::start();
            let outcome = candidate.call(args);
            let elapsed = timer.stop_secs();

            black_box(outcome?);
            samples.push(elapsed);
        }

        Ok(samples)
    }
}

/// Records traced allocation bytes for isolated invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySampler {
    /// Number of samples (one invocation each)
    pub num_samples: usize,
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SAMPLES)
    }
}

impl MemorySampler {
    /// Create a sampler taking `num_samples` samples
    pub fn new(num_samples: usize) -> Self {
        Self { num_samples }
    }

    /// Build from a [`BenchmarkConfig`]
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.memory_samples)
    }

    /// Take exactly `num_samples` memory measurements.
    ///
    /// Each sample reclaims twice, traces exactly one invocation, sizes the
    /// result after tracing stops, drops it, and reclaims again.
    pub fn run<C>(
        &self,
        candidate: &C,
        args: &Arguments,
    ) -> Result<Vec<MemoryMeasurement>, ExecutionError>
    where
        C: Candidate + ?Sized,
    {
        if self.num_samples > 0 && !tracer_installed() {
            tracing::warn!("TracingAllocator is not the global allocator, traced bytes read 0");
        }

        let mut measurements = Vec::with_capacity(self.num_samples);

        for _ in 0..self.num_samples {
            candidate.reclaim();
            candidate.reclaim();

            let session = TraceSession::start();
            let outcome = candidate.call(args);
            let traced = session.stop();

            let result = outcome?;
            let size = result_size(&result);
            drop(result);
            candidate.reclaim();

            measurements.push(MemoryMeasurement {
                current_bytes: traced.current_bytes,
                peak_bytes: traced.peak_bytes,
                result_size: size,
            });
        }

        Ok(measurements)
    }
}
