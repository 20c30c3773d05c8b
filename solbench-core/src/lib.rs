#![warn(missing_docs)]
//! SolBench Core - Measurement Runtime
//!
//! This crate provides the execution environment for benchmarking a
//! candidate callable:
//! - `Candidate` trait and the `Payload` → `Arguments` call-shape adapter
//! - `TimingSampler` with warm-up and monotonic per-call timing
//! - `MemorySampler` driven by the `TracingAllocator` global allocator
//! - `CallableResolver` seam with a link-time solution registry
//!
//! Everything runs synchronously on the calling thread. Invocations are
//! never parallelized: memory sampling relies on a single process-wide
//! allocation tracer (see [`TraceSession`]).

mod allocator;
mod candidate;
mod config;
mod measure;
mod registry;
mod sampler;
mod size;

pub use allocator::{TraceSession, TracedMemory, TracingAllocator, tracer_installed};
pub use candidate::{
    Arguments, Candidate, CandidateError, ExecutionError, Payload, PayloadShape,
};
pub use config::{BenchmarkConfig, DEFAULT_MEMORY_SAMPLES, DEFAULT_NUM_RUNS, DEFAULT_WARMUP_RUNS};
pub use measure::{Timer, pin_to_cpu};
pub use registry::{
    CallableResolver, ENTRY_POINT, REGISTRY_ANCHOR, RegistryResolver, SolutionDef, SolutionFn,
    registered_solutions,
};
pub use sampler::{MemoryMeasurement, MemorySampler, TimingSampler};
pub use size::{result_size, shallow_size};

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}
