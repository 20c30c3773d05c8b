#![warn(missing_docs)]
//! SolBench CLI Library
//!
//! This module provides the orchestration layer and the CLI for binaries
//! that register solutions. Use `solbench::run()` (or `solbench_cli::run()`)
//! in your main function to get the full solbench CLI with your registered
//! solutions.
//!
//! # Example
//!
//! ```ignore
//! use solbench::prelude::*;
//!
//! fn solution(args: &Arguments) -> Result<Value, CandidateError> {
//!     Ok(json!(args.require_i64(0, "n")? * 2))
//! }
//! solbench::submit_solution!("double", solution);
//!
//! #[global_allocator]
//! static GLOBAL: TracingAllocator = TracingAllocator;
//!
//! fn main() -> anyhow::Result<()> {
//!     solbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    BatchCase, Orchestrator, OrchestratorError, benchmark_candidate, format_human_output,
};
pub use planner::{ListingPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use serde_json::Value;
use solbench_core::{BenchmarkConfig, PayloadShape, RegistryResolver, registered_solutions};
use solbench_report::{OutputFormat, ReportEnvelope, ReportMeta, generate_json_report};
use std::io::Write;
use std::path::{Path, PathBuf};

/// SolBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "solbench")]
#[command(author, version, about = "SolBench - timing and memory benchmarks for solution candidates")]
pub struct Cli {
    /// Optional subcommand; defaults to listing every solution
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: human, json (overrides solbench.toml)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Measured timing runs
    #[arg(long, global = true)]
    pub runs: Option<usize>,

    /// Discarded warm-up runs before timing
    #[arg(long, global = true)]
    pub warmup: Option<usize>,

    /// Memory samples (one traced invocation each)
    #[arg(long, global = true)]
    pub memory_samples: Option<usize>,

    /// Pin the measuring thread to this CPU
    #[arg(long, global = true)]
    pub pin_cpu: Option<usize>,

    /// Omit the candidate's result value from reports
    #[arg(long, global = true)]
    pub no_result: bool,

    /// Configuration file (default: discover solbench.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered solutions
    List {
        /// Filter modules by regex pattern
        #[arg(default_value = ".*")]
        filter: String,
        /// Include non-entry-point functions
        #[arg(long)]
        all: bool,
    },
    /// Benchmark one entry
    Run {
        /// Module key of the solution to benchmark
        entry: String,
        /// Payload as inline JSON
        #[arg(long)]
        payload: Option<String>,
        /// Read the payload JSON from a file
        #[arg(long, conflicts_with = "payload")]
        payload_file: Option<PathBuf>,
        /// Call shape: auto, positional, named, single
        #[arg(long, default_value = "auto")]
        shape: PayloadShape,
    },
    /// Benchmark every case of a JSON batch file, sequentially
    Batch {
        /// JSON array of {"entry", "payload", "shape"?} cases
        file: PathBuf,
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Print a default solbench.toml
    Init,
}

/// Run the SolBench CLI with the process arguments.
/// This is the main entry point for solution binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SolBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Explicit --config must load; otherwise discover solbench.toml (CLI flags override)
    let config = match &cli.config {
        Some(path) => SolConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SolConfig::discover().unwrap_or_default(),
    };

    match &cli.command {
        Some(Commands::List { filter, all }) => list_solutions(filter, *all),
        Some(Commands::Run {
            entry,
            payload,
            payload_file,
            shape,
        }) => {
            let value = read_payload(payload.as_deref(), payload_file.as_deref())?;
            run_single(&cli, &config, entry, value, *shape)
        }
        Some(Commands::Batch { file, no_progress }) => run_batch(&cli, &config, file, !no_progress),
        Some(Commands::Init) => write_output(cli.output.as_deref(), &SolConfig::default_toml()),
        None => list_solutions(".*", false),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "solbench=debug"
    } else {
        "solbench=info"
    };
    // Report output goes to stdout; keep logs off it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Layer sampling settings: defaults → solbench.toml → CLI flags.
pub fn build_benchmark_config(cli: &Cli, config: &SolConfig) -> BenchmarkConfig {
    let file = &config.runner;
    BenchmarkConfig {
        num_runs: cli.runs.unwrap_or(file.num_runs),
        warmup_runs: cli.warmup.unwrap_or(file.warmup_runs),
        memory_samples: cli.memory_samples.unwrap_or(file.memory_samples),
        pin_cpu: cli.pin_cpu.or(file.pin_cpu),
    }
}

fn resolve_format(cli: &Cli, config: &SolConfig) -> anyhow::Result<OutputFormat> {
    let raw = cli.format.as_deref().unwrap_or(&config.output.format);
    raw.parse::<OutputFormat>().map_err(anyhow::Error::msg)
}

fn read_payload(inline: Option<&str>, file: Option<&Path>) -> anyhow::Result<Value> {
    let text = match (inline, file) {
        (Some(json), _) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload {}", path.display()))?,
        (None, None) => return Ok(Value::Null),
    };
    serde_json::from_str(&text).context("payload is not valid JSON")
}

fn list_solutions(filter: &str, all: bool) -> anyhow::Result<()> {
    let filter_re = Regex::new(filter).with_context(|| format!("invalid filter '{filter}'"))?;
    let plan = build_plan(registered_solutions(), Some(&filter_re), !all);

    println!("SolBench Solutions:");
    for (module, defs) in &plan.modules {
        println!("├── module: {}", module);
        for def in defs {
            println!("│   ├── {} ({}:{})", def.name, def.file, def.line);
        }
    }
    println!("{} solutions found.", plan.len());

    Ok(())
}

fn run_single(
    cli: &Cli,
    config: &SolConfig,
    entry: &str,
    payload: Value,
    shape: PayloadShape,
) -> anyhow::Result<()> {
    let format = resolve_format(cli, config)?;
    let bench_config = build_benchmark_config(cli, config);
    let payload = shape.apply(payload).map_err(anyhow::Error::msg)?;

    let orchestrator = Orchestrator::new(RegistryResolver::new(), bench_config);
    // Unresolvable entries are fatal; candidate failures still produce a report
    let report = orchestrator.run(entry, payload)?;

    let mut envelope = ReportEnvelope {
        meta: ReportMeta::now(bench_config),
        entry: entry.trim().to_string(),
        report: Some(report),
        error: None,
    };
    if !include_result(cli, config) {
        envelope.report = envelope.report.map(|r| r.without_result());
    }

    let output = match format {
        OutputFormat::Json => generate_json_report(&envelope)?,
        OutputFormat::Human => format_human_output(std::slice::from_ref(&envelope)),
    };
    write_output(cli.output.as_deref(), &output)
}

fn run_batch(cli: &Cli, config: &SolConfig, file: &Path, show_progress: bool) -> anyhow::Result<()> {
    let format = resolve_format(cli, config)?;
    let bench_config = build_benchmark_config(cli, config);

    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read batch file {}", file.display()))?;
    let cases = BatchCase::parse_list(&json).context("batch file must be a JSON array of cases")?;

    if cases.is_empty() {
        eprintln!("Batch file contains no cases.");
    }

    let orchestrator = Orchestrator::new(RegistryResolver::new(), bench_config);
    let mut envelopes = orchestrator.run_batch(&cases, show_progress);

    if !include_result(cli, config) {
        for envelope in &mut envelopes {
            envelope.report = envelope.report.take().map(|r| r.without_result());
        }
    }

    let output = match format {
        OutputFormat::Json => generate_json_report(&envelopes)?,
        OutputFormat::Human => format_human_output(&envelopes),
    };
    write_output(cli.output.as_deref(), &output)
}

fn include_result(cli: &Cli, config: &SolConfig) -> bool {
    config.output.include_result && !cli.no_result
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(path) = path {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        eprintln!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}
