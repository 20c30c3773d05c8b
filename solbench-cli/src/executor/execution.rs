//! Benchmark Execution
//!
//! Core orchestration: resolve the entry, adapt the payload, then run the
//! baseline call, timing sampler and memory sampler in order. Any error or
//! panic from the candidate is turned into a failed [`BenchmarkReport`]
//! instead of escaping.

use solbench_core::{
    Arguments, BenchmarkConfig, CallableResolver, Candidate, ExecutionError, MemoryMeasurement,
    MemorySampler, Payload, TimingSampler,
};
use solbench_report::BenchmarkReport;
use serde_json::Value;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, PanicHookInfo};
use std::sync::Once;
use std::time::Instant;
use thiserror::Error;

thread_local! {
    /// Set while this thread is inside a fault boundary
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    /// Trace recorded by the panic hook for the last captured panic
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Errors raised before any measurement starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// The source text does not define the entry point
    #[error("No callable function found in '{entry}'. Please define a function '{entry_point}'")]
    CallableNotFound {
        /// Source text / module key that was resolved
        entry: String,
        /// Entry point the resolver looked for
        entry_point: String,
    },
}

/// Raw samples collected from one successful run
struct Samples {
    result: Value,
    timing: Vec<f64>,
    memory: Vec<MemoryMeasurement>,
}

/// Benchmarks candidates produced by a [`CallableResolver`]
#[derive(Debug, Clone)]
pub struct Orchestrator<R> {
    resolver: R,
    config: BenchmarkConfig,
}

impl<R: CallableResolver> Orchestrator<R> {
    /// Create an orchestrator with the given resolver and sampling config
    pub fn new(resolver: R, config: BenchmarkConfig) -> Self {
        Self { resolver, config }
    }

    /// Sampling configuration in use
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Resolve `source` and benchmark its entry point with `payload`.
    ///
    /// Only an unresolvable entry is an `Err`; candidate failures come back
    /// as a report with `success == false`.
    pub fn run(&self, source: &str, payload: Payload) -> Result<BenchmarkReport, OrchestratorError> {
        let entry = source.trim();
        tracing::debug!(entry, "resolving entry point");

        let candidate = self.resolver.resolve(source).ok_or_else(|| {
            tracing::warn!(entry, "no callable entry point");
            OrchestratorError::CallableNotFound {
                entry: entry.to_string(),
                entry_point: solbench_core::ENTRY_POINT.to_string(),
            }
        })?;

        Ok(benchmark_candidate(candidate.as_ref(), payload, &self.config))
    }
}

/// Benchmark an already-resolved candidate.
///
/// The baseline call, timing and memory phases run inside one fault
/// boundary; the first error or panic ends the run.
pub fn benchmark_candidate<C>(
    candidate: &C,
    payload: Payload,
    config: &BenchmarkConfig,
) -> BenchmarkReport
where
    C: Candidate + ?Sized,
{
    let start = Instant::now();
    let args = payload.adapt();

    let outcome = run_in_boundary(|| collect_samples(candidate, &args, config));

    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    match outcome {
        Ok(samples) => {
            let report = BenchmarkReport::succeeded(samples.result, samples.timing, samples.memory);
            tracing::info!(
                mean_time = report.timing().mean_time(),
                outliers = report.timing().outliers(),
                elapsed_ms,
                "benchmark complete"
            );
            report
        }
        Err((err, trace)) => {
            tracing::warn!(error = %err, elapsed_ms, "benchmark failed");
            BenchmarkReport::failed(format!("{err}\n{trace}"), None)
        }
    }
}

fn collect_samples<C>(
    candidate: &C,
    args: &Arguments,
    config: &BenchmarkConfig,
) -> Result<Samples, ExecutionError>
where
    C: Candidate + ?Sized,
{
    tracing::debug!("baseline invocation");
    let result = candidate.call(args)?;

    tracing::debug!(
        runs = config.num_runs,
        warmup = config.warmup_runs,
        "timing phase"
    );
    let timing = TimingSampler::from_config(config).run(candidate, args)?;

    tracing::debug!(samples = config.memory_samples, "memory phase");
    let memory = MemorySampler::from_config(config).run(candidate, args)?;

    Ok(Samples {
        result,
        timing,
        memory,
    })
}

/// Install the process panic hook once.
///
/// Panics raised inside a fault boundary record their location and a
/// backtrace for the failed report and print nothing. Every other panic is
/// handed to the hook that was installed before.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            if !CAPTURING.try_with(Cell::get).unwrap_or(false) {
                return previous(info);
            }
            let location = info
                .location()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<unknown>".to_string());
            let trace = format!("panicked at {location}\n{}", Backtrace::force_capture());
            let _ = PANIC_TRACE.try_with(|slot| *slot.borrow_mut() = Some(trace));
        }));
    });
}

/// Run `f` with errors and panics turned into an [`ExecutionError`] plus its trace
fn run_in_boundary<T>(
    f: impl FnOnce() -> Result<T, ExecutionError>,
) -> Result<T, (ExecutionError, String)> {
    install_panic_hook();
    PANIC_TRACE.with(|slot| *slot.borrow_mut() = None);
    let outer = CAPTURING.replace(true);

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(f));

    CAPTURING.set(outer);

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let trace = error_trace(&err);
            Err((err, trace))
        }
        Err(payload) => {
            // Hook replaced by someone else: fall back to the catch site
            let trace = PANIC_TRACE
                .with(|slot| slot.borrow_mut().take())
                .unwrap_or_else(|| Backtrace::force_capture().to_string());
            Err((ExecutionError::from_panic(payload), trace))
        }
    }
}

fn error_trace(err: &ExecutionError) -> String {
    match err {
        ExecutionError::Candidate(e) => {
            format!("raised at {}\n{}", e.location(), Backtrace::force_capture())
        }
        ExecutionError::Panicked { .. } => Backtrace::force_capture().to_string(),
    }
}
