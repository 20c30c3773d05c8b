#![warn(missing_docs)]
//! # SolBench
//!
//! Timing and memory benchmarks for solution candidates.
//!
//! SolBench invokes a candidate callable repeatedly with one fixed payload and
//! reports:
//! - **Timing**: warm-up, then per-call wall-clock durations with IQR outlier rejection
//! - **Memory**: traced net and peak heap bytes per isolated invocation
//! - **Result size**: a shallow estimate of the returned value's footprint
//! - **Failure containment**: errors and panics become a failed report, never a crash
//!
//! ## Quick Start
//!
//! ```ignore
//! use solbench::prelude::*;
//!
//! fn solution(args: &Arguments) -> Result<Value, CandidateError> {
//!     let n = args.require_i64(0, "n")?;
//!     Ok(json!((0..n).sum::<i64>()))
//! }
//! solbench::submit_solution!("sum_to_n", solution);
//!
//! #[global_allocator]
//! static GLOBAL: TracingAllocator = TracingAllocator;
//!
//! fn main() -> anyhow::Result<()> {
//!     solbench::run()
//! }
//! ```
//!
//! ## Programmatic Use
//!
//! ```ignore
//! let orchestrator = Orchestrator::new(RegistryResolver::new(), BenchmarkConfig::default());
//! let report = orchestrator.run("sum_to_n", Payload::infer(json!(1000)))?;
//! assert!(report.success());
//! ```

// Re-export core types
pub use solbench_core::{
    Arguments, BenchmarkConfig, CallableResolver, Candidate, CandidateError, ExecutionError,
    MemoryMeasurement, MemorySampler, Payload, PayloadShape, RegistryResolver, SolutionDef,
    TimingSampler, TraceSession, TracingAllocator, registered_solutions, result_size,
    shallow_size, submit_solution, tracer_installed,
};

// Re-export report types
pub use solbench_report::{
    BenchmarkReport, MemoryReport, OutputFormat, ReportEnvelope, ReportMeta, TimingReport,
    generate_json_report,
};

// Re-export stats
pub use solbench_stats::{SummaryStatistics, compute_summary, filter_outliers};

// Re-export orchestration
pub use solbench_cli::{
    BatchCase, Orchestrator, OrchestratorError, SolConfig, benchmark_candidate,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Arguments, BenchmarkConfig, BenchmarkReport, Candidate, CandidateError, Orchestrator,
        Payload, RegistryResolver, TracingAllocator, submit_solution,
    };
    pub use serde_json::{Value, json};
}

/// Run the SolBench CLI harness.
///
/// Call this from your solution binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     solbench::run()
/// }
/// ```
pub use solbench_cli::run;
