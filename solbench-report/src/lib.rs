#![warn(missing_docs)]
//! SolBench Report - Report Model and Output
//!
//! - `TimingReport` / `MemoryReport`: statistics derived once from raw samples
//! - `BenchmarkReport`: the uniform success/failure outcome
//! - `ReportEnvelope`: transport wrapper with run metadata
//! - JSON output and unit formatting helpers

mod format;
mod json;
mod report;

pub use format::{format_bytes, format_duration};
pub use json::generate_json_report;
pub use report::{
    BenchmarkReport, MemoryReport, ReportEnvelope, ReportMeta, SCHEMA_VERSION, TimingReport,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
