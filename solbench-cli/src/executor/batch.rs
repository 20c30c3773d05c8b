//! Batch Execution
//!
//! Runs a list of cases sequentially, one envelope per case. Cases never run
//! in parallel: memory sampling needs the process-wide allocation tracer to
//! itself.

use super::execution::Orchestrator;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solbench_core::{CallableResolver, PayloadShape};
use solbench_report::{ReportEnvelope, ReportMeta};

/// One entry of a batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCase {
    /// Source text / module key to resolve
    pub entry: String,
    /// Input payload
    #[serde(default)]
    pub payload: Value,
    /// Call shape for the payload
    #[serde(default)]
    pub shape: PayloadShape,
}

impl BatchCase {
    /// Parse a JSON array of cases
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<R: CallableResolver> Orchestrator<R> {
    /// Run a single case into an envelope.
    ///
    /// Resolution and payload-shape errors are recorded in the envelope
    /// rather than aborting.
    pub fn run_case(&self, case: &BatchCase) -> ReportEnvelope {
        let outcome = case
            .shape
            .apply(case.payload.clone())
            .and_then(|payload| self.run(&case.entry, payload).map_err(|e| e.to_string()));

        let (report, error) = match outcome {
            Ok(report) => (Some(report), None),
            Err(error) => (None, Some(error)),
        };

        ReportEnvelope {
            meta: ReportMeta::now(*self.config()),
            entry: case.entry.trim().to_string(),
            report,
            error,
        }
    }

    /// Run every case in order, optionally showing a progress bar
    pub fn run_batch(&self, cases: &[BatchCase], show_progress: bool) -> Vec<ReportEnvelope> {
        let pb = if show_progress {
            ProgressBar::new(cases.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut envelopes = Vec::with_capacity(cases.len());
        for case in cases {
            pb.set_message(case.entry.trim().to_string());
            envelopes.push(self.run_case(case));
            pb.inc(1);
        }

        pb.finish_with_message("Complete");
        envelopes
    }
}
