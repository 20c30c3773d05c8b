//! Integration tests for SolBench
//!
//! The test binary installs the tracing allocator so memory sampling sees
//! real byte counts.

use solbench::prelude::*;
use solbench::{
    MemoryMeasurement, MemoryReport, MemorySampler, OrchestratorError, PayloadShape, ReportEnvelope,
    ReportMeta, TimingReport, benchmark_candidate, generate_json_report, result_size,
    tracer_installed,
};
use std::hint::black_box;

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator;

const EPS: f64 = 1e-9;

fn small_config() -> BenchmarkConfig {
    BenchmarkConfig {
        num_runs: 20,
        warmup_runs: 3,
        memory_samples: 5,
        pin_cpu: None,
    }
}

fn orchestrator() -> Orchestrator<RegistryResolver> {
    Orchestrator::new(RegistryResolver::new(), small_config())
}

mod constant_answer {
    use super::*;
    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        Ok(json!(42))
    }
}
submit_solution!("constant_answer", constant_answer::solution);

mod always_raises {
    use super::*;
    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        Err(CandidateError::new("intentional failure"))
    }
}
submit_solution!("always_raises", always_raises::solution);

mod panics {
    use super::*;
    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        panic!("index out of range in candidate");
    }
}
submit_solution!("panics", panics::solution);

mod allocates_64k {
    use super::*;
    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        let buffer = black_box(vec![0u8; 64 * 1024]);
        Ok(json!(buffer.len()))
    }
}
submit_solution!("allocates_64k", allocates_64k::solution);

mod build_list {
    use super::*;
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let n = args.require_i64(0, "n")?;
        Ok(Value::Array((0..n).map(|i| json!(i)).collect()))
    }
}
submit_solution!("build_list", build_list::solution);

mod add {
    use super::*;
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        Ok(json!(args.require_i64(0, "a")? + args.require_i64(1, "b")?))
    }
    pub fn helper(_: &Arguments) -> Result<Value, CandidateError> {
        Ok(Value::Null)
    }
}
submit_solution!("add", add::solution);
submit_solution!("add", "helper", add::helper);

mod sleeps {
    use super::*;
    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        std::thread::sleep(std::time::Duration::from_millis(1));
        Ok(Value::Null)
    }
}
submit_solution!("sleeps", sleeps::solution);

// Success path

#[test]
fn test_constant_candidate_succeeds() {
    let report = orchestrator()
        .run("constant_answer", Payload::Single(Value::Null))
        .unwrap();

    assert!(report.success());
    assert_eq!(report.result(), Some(&json!(42)));
    assert_eq!(report.error(), None);
    assert_eq!(report.timing().samples(), 20);
    assert_eq!(report.memory().samples(), 5);
    assert!(report.timing().mean_time() >= 0.0);
    assert!(report.timing().min_time() <= report.timing().median_time());
    assert!(report.timing().median_time() <= report.timing().max_time());
}

#[test]
fn test_source_text_is_trimmed() {
    let report = orchestrator()
        .run("\n  constant_answer \n", Payload::Single(Value::Null))
        .unwrap();
    assert!(report.success());
}

#[test]
fn test_default_sample_counts() {
    let orchestrator = Orchestrator::new(RegistryResolver::new(), BenchmarkConfig::default());
    let report = orchestrator
        .run("constant_answer", Payload::Single(Value::Null))
        .unwrap();

    assert_eq!(report.timing().samples(), 100);
    assert_eq!(report.memory().samples(), 10);
}

#[test]
fn test_timing_reflects_work() {
    let report = orchestrator()
        .run("sleeps", Payload::Single(Value::Null))
        .unwrap();

    assert!(report.success());
    assert!(report.timing().mean_time() >= 0.001);
    assert!(report.timing().total_time() >= report.timing().mean_time());
}

// Resolution

#[test]
fn test_missing_entry_point_is_error() {
    let err = orchestrator()
        .run("no_such_module", Payload::Single(Value::Null))
        .unwrap_err();

    match err {
        OrchestratorError::CallableNotFound { entry, .. } => assert_eq!(entry, "no_such_module"),
    }
}

#[test]
fn test_helper_is_not_entry_point() {
    let defs = solbench::registered_solutions();
    assert!(defs.iter().any(|d| d.module == "add" && d.name == "helper"));

    let report = orchestrator()
        .run("add", Payload::Positional(vec![json!(2), json!(3)]))
        .unwrap();
    assert_eq!(report.result(), Some(&json!(5)));
}

// Failure containment

#[test]
fn test_raising_candidate_reports_failure() {
    let report = orchestrator()
        .run("always_raises", Payload::Single(Value::Null))
        .unwrap();

    assert!(!report.success());
    assert_eq!(report.result(), None);
    let error = report.error().unwrap();
    assert!(error.starts_with("intentional failure\n"));
    assert!(error.contains(&format!("raised at {}:", file!())));
    assert_eq!(report.timing(), &TimingReport::empty());
    assert_eq!(report.memory(), &MemoryReport::empty());
}

#[test]
fn test_panicking_candidate_reports_failure() {
    let report = orchestrator()
        .run("panics", Payload::Single(Value::Null))
        .unwrap();

    let error = report.error().unwrap();
    assert!(!report.success());
    assert!(error.contains("index out of range in candidate"));
    // Message, then the panic site, then the backtrace
    assert!(error.contains(&format!("panicked at {}:", file!())));
    assert!(error.lines().count() > 2);
    assert_eq!(report.timing().samples(), 0);
}

#[test]
fn test_tracer_released_after_failure() {
    let failed = orchestrator()
        .run("panics", Payload::Single(Value::Null))
        .unwrap();
    assert!(!failed.success());

    // A later benchmark can still trace memory
    let report = orchestrator()
        .run("allocates_64k", Payload::Single(Value::Null))
        .unwrap();
    assert!(report.success());
    assert_eq!(report.memory().samples(), 5);
}

// Memory

#[test]
fn test_peak_bytes_cover_allocation() {
    let report = orchestrator()
        .run("allocates_64k", Payload::Single(Value::Null))
        .unwrap();
    assert!(tracer_installed());

    assert!(report.success());
    assert!(report.memory().mean_peak_bytes() >= 65536.0);
    assert!(report.memory().median_peak_bytes() >= 65536.0);
    // The buffer is freed before returning
    assert!(report.memory().mean_used_bytes() < 65536.0);
}

#[test]
fn test_peak_after_freeing_preexisting_buffer() {
    // Buffers allocated before sampling; each call evicts one, then allocates
    let cache = std::cell::RefCell::new(vec![vec![1u8; 64 * 1024]; 3]);
    let evicting = |_: &Arguments| -> Result<Value, CandidateError> {
        drop(cache.borrow_mut().pop());
        let fresh = black_box(vec![2u8; 32 * 1024]);
        Ok(json!(fresh.len()))
    };
    let args = Payload::Single(Value::Null).adapt();

    let samples = MemorySampler::new(3).run(&evicting, &args).unwrap();

    assert_eq!(samples.len(), 3);
    for sample in &samples {
        assert!(sample.peak_bytes >= 32 * 1024, "peak too low: {sample:?}");
    }
}

#[test]
fn test_result_size_of_list() {
    let report = orchestrator()
        .run("build_list", Payload::Single(json!(10)))
        .unwrap();

    let expected = result_size(&Value::Array((0..10).map(|i| json!(i)).collect()));
    assert!((report.memory().result_size_bytes() - expected as f64).abs() < EPS);
}

// Argument adaptation

#[test]
fn test_payload_shapes() {
    let orchestrator = orchestrator();

    let positional = orchestrator
        .run("add", Payload::infer(json!([4, 5])))
        .unwrap();
    assert_eq!(positional.result(), Some(&json!(9)));

    let named = orchestrator
        .run("add", Payload::infer(json!({"a": 1, "b": 2})))
        .unwrap();
    assert_eq!(named.result(), Some(&json!(3)));

    // A list passed as a single argument is not spread
    let single = PayloadShape::Single.apply(json!([7])).unwrap();
    let report = orchestrator.run("build_list", single).unwrap();
    assert!(!report.success());
    assert!(report.error().unwrap().contains("missing integer argument"));
}

// Closures as candidates

#[test]
fn test_closure_candidate() {
    let offset = 100;
    let candidate = move |args: &Arguments| -> Result<Value, CandidateError> {
        Ok(json!(args.require_i64(0, "x")? + offset))
    };

    let report = benchmark_candidate(&candidate, Payload::Single(json!(1)), &small_config());
    assert_eq!(report.result(), Some(&json!(101)));
}

// Statistics

#[test]
fn test_timing_statistics_known_samples() {
    let report = TimingReport::from_samples(vec![1.0, 2.0, 3.0, 4.0, 100.0]);

    assert_eq!(report.samples(), 5);
    assert_eq!(report.outliers(), 1);
    assert!((report.mean_time() - 2.5).abs() < EPS);
    assert!((report.median_time() - 3.0).abs() < EPS);
    assert!((report.max_time() - 4.0).abs() < EPS);
    assert!((report.total_time() - 10.0).abs() < EPS);
}

#[test]
fn test_memory_statistics_known_samples() {
    let measurements = vec![
        MemoryMeasurement {
            current_bytes: 100,
            peak_bytes: 400,
            result_size: 10,
        },
        MemoryMeasurement {
            current_bytes: 200,
            peak_bytes: 400,
            result_size: 20,
        },
    ];
    let report = MemoryReport::from_measurements(measurements);

    assert_eq!(report.samples(), 2);
    assert!((report.mean_used_bytes() - 150.0).abs() < EPS);
    assert!((report.median_used_bytes() - 200.0).abs() < EPS);
    assert!((report.mean_peak_bytes() - 400.0).abs() < EPS);
    assert!((report.result_size_bytes() - 15.0).abs() < EPS);
}

// Output

#[test]
fn test_json_envelope() {
    let report = orchestrator()
        .run("constant_answer", Payload::Single(Value::Null))
        .unwrap();
    let envelope = ReportEnvelope {
        meta: ReportMeta::now(small_config()),
        entry: "constant_answer".to_string(),
        report: Some(report),
        error: None,
    };

    let json: Value = serde_json::from_str(&generate_json_report(&envelope).unwrap()).unwrap();
    assert_eq!(json["entry"], "constant_answer");
    assert_eq!(json["meta"]["config"]["num_runs"], 20);
    assert_eq!(json["report"]["result"], 42);
    assert_eq!(json["report"]["success"], true);
    assert!(json["report"]["error"].is_null());
    assert_eq!(json["report"]["timing"]["samples"], 20);
}
