//! Benchmark Executor
//!
//! Resolves entries, runs the measurement pipeline and formats results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! source text + payload
//!       │
//!       ▼
//! ┌─────────────┐
//! │  resolver   │  Source text → Candidate (CallableNotFound on miss)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  execution  │  Baseline call, timing, memory (one fault boundary)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Outlier filtering + statistics (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Orchestration and failure containment
//! - [`batch`] - Sequential multi-case runs
//! - [`formatting`] - Human-readable output formatting

mod batch;
mod execution;
mod formatting;

// Re-export public API
pub use batch::BatchCase;
pub use execution::{Orchestrator, OrchestratorError, benchmark_candidate};
pub use formatting::format_human_output;
