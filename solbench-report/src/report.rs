//! Report Data Structures
//!
//! Statistics are derived once, when a report is built from raw samples.
//! Raw samples are consumed by the constructors and never stored, so a
//! serialized report only carries derived values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solbench_core::{BenchmarkConfig, MemoryMeasurement};
use solbench_stats::{SummaryStatistics, compute_summary, mean};

/// Current envelope schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Timing statistics over outlier-filtered per-call durations (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    samples: usize,
    outliers: usize,
    total_time: f64,
    mean_time: f64,
    median_time: f64,
    min_time: f64,
    max_time: f64,
    std_dev: f64,
    cv_percent: f64,
}

impl TimingReport {
    /// Derive timing statistics from raw per-call durations
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self::from_summary(&compute_summary(&samples))
    }

    fn from_summary(stats: &SummaryStatistics) -> Self {
        Self {
            samples: stats.sample_count,
            outliers: stats.outlier_count(),
            total_time: stats.total,
            mean_time: stats.mean,
            median_time: stats.median,
            min_time: stats.min,
            max_time: stats.max,
            std_dev: stats.std_dev,
            cv_percent: stats.coefficient_of_variation(),
        }
    }

    /// Report with no samples; every statistic is zero
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw timed runs
    pub fn samples(&self) -> usize {
        self.samples
    }
    /// Runs rejected as outliers
    pub fn outliers(&self) -> usize {
        self.outliers
    }
    /// Sum of kept durations
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
    /// Mean kept duration
    pub fn mean_time(&self) -> f64 {
        self.mean_time
    }
    /// Floor-index median kept duration
    pub fn median_time(&self) -> f64 {
        self.median_time
    }
    /// Fastest kept duration
    pub fn min_time(&self) -> f64 {
        self.min_time
    }
    /// Slowest kept duration
    pub fn max_time(&self) -> f64 {
        self.max_time
    }
    /// Population standard deviation of kept durations
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
    /// Coefficient of variation, percent
    pub fn cv_percent(&self) -> f64 {
        self.cv_percent
    }
}

/// Memory statistics over per-sample traced bytes
///
/// `current` and `peak` columns are outlier-filtered independently. The
/// result size is the mean over ALL samples, unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryReport {
    samples: usize,
    mean_used_bytes: f64,
    median_used_bytes: f64,
    mean_peak_bytes: f64,
    median_peak_bytes: f64,
    result_size_bytes: f64,
}

impl MemoryReport {
    /// Derive memory statistics from raw measurements
    pub fn from_measurements(measurements: Vec<MemoryMeasurement>) -> Self {
        let column = |f: fn(&MemoryMeasurement) -> u64| -> Vec<f64> {
            measurements.iter().map(|m| f(m) as f64).collect()
        };

        let used = compute_summary(&column(|m| m.current_bytes));
        let peak = compute_summary(&column(|m| m.peak_bytes));
        let result_sizes = column(|m| m.result_size);

        Self {
            samples: measurements.len(),
            mean_used_bytes: used.mean,
            median_used_bytes: used.median,
            mean_peak_bytes: peak.mean,
            median_peak_bytes: peak.median,
            result_size_bytes: mean(&result_sizes),
        }
    }

    /// Report with no samples; every statistic is zero
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw memory samples taken
    pub fn samples(&self) -> usize {
        self.samples
    }
    /// Mean of filtered current bytes
    pub fn mean_used_bytes(&self) -> f64 {
        self.mean_used_bytes
    }
    /// Median of filtered current bytes
    pub fn median_used_bytes(&self) -> f64 {
        self.median_used_bytes
    }
    /// Mean of filtered peak bytes
    pub fn mean_peak_bytes(&self) -> f64 {
        self.mean_peak_bytes
    }
    /// Median of filtered peak bytes
    pub fn median_peak_bytes(&self) -> f64 {
        self.median_peak_bytes
    }
    /// Mean result size over all samples
    pub fn result_size_bytes(&self) -> f64 {
        self.result_size_bytes
    }
}

/// Outcome of benchmarking one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    result: Option<Value>,
    success: bool,
    timing: TimingReport,
    memory: MemoryReport,
    error: Option<String>,
}

impl BenchmarkReport {
    /// Successful report; timing and memory statistics are derived here.
    ///
    /// The two derivations are independent and run in parallel; sampling has
    /// already finished, so this cannot disturb measurements.
    pub fn succeeded(
        result: Value,
        timing_samples: Vec<f64>,
        memory_samples: Vec<MemoryMeasurement>,
    ) -> Self {
        let (timing, memory) = rayon::join(
            || TimingReport::from_samples(timing_samples),
            || MemoryReport::from_measurements(memory_samples),
        );

        Self {
            result: Some(result),
            success: true,
            timing,
            memory,
            error: None,
        }
    }

    /// Failed report with empty statistics.
    ///
    /// A `prior_result`, if any, is kept in stringified form.
    pub fn failed(error: impl Into<String>, prior_result: Option<Value>) -> Self {
        Self {
            result: prior_result.map(|value| Value::String(value.to_string())),
            success: false,
            timing: TimingReport::empty(),
            memory: MemoryReport::empty(),
            error: Some(error.into()),
        }
    }

    /// Value returned by the baseline invocation
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }
    /// Whether every stage completed
    pub fn success(&self) -> bool {
        self.success
    }
    /// Timing statistics
    pub fn timing(&self) -> &TimingReport {
        &self.timing
    }
    /// Memory statistics
    pub fn memory(&self) -> &MemoryReport {
        &self.memory
    }
    /// Error message and trace on failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drop the result value, e.g. when it is too large to transmit
    pub fn without_result(self) -> Self {
        Self {
            result: None,
            ..self
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Envelope schema version
    pub schema_version: u32,
    /// Producing crate version
    pub version: String,
    /// When the benchmark finished
    pub timestamp: DateTime<Utc>,
    /// Sampling configuration used
    pub config: BenchmarkConfig,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn now(config: BenchmarkConfig) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            config,
        }
    }
}

/// Transport envelope around one benchmark outcome
///
/// `report` is absent when the entry could not be resolved; `error` then
/// explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    /// Run metadata
    pub meta: ReportMeta,
    /// Source text / module key that was benchmarked
    pub entry: String,
    /// Benchmark outcome
    pub report: Option<BenchmarkReport>,
    /// Resolution error, when no report was produced
    pub error: Option<String>,
}
