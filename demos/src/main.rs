//! SolBench Demo Solutions
//!
//! A handful of registered solutions to try the CLI against.
//!
//! Run with:
//!   cargo run -p solbench-demos -- list                                   # List solutions
//!   cargo run -p solbench-demos -- run sum_range --payload '[0, 1000]'    # Positional payload
//!   cargo run -p solbench-demos -- run word_count --payload '{"text": "a b a"}'
//!   cargo run -p solbench-demos -- run build_list --payload 500 --format json
//!   cargo run -p solbench-demos -- batch demos/batch.json                 # Many cases
//!   cargo run -p solbench-demos -- init > solbench.toml                   # Default config

use solbench::prelude::*;
use std::collections::BTreeMap;
use std::hint::black_box;

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator;

// ============================================================================
// Arithmetic
// ============================================================================

mod sum_range {
    use super::*;

    /// Sum of the half-open range `[start, end)`
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let start = args.require_i64(0, "start")?;
        let end = args.require_i64(1, "end")?;
        Ok(json!((start..end).sum::<i64>()))
    }
}
submit_solution!("sum_range", sum_range::solution);

mod fibonacci {
    use super::*;

    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let n = args.require_i64(0, "n")?;
        if n < 0 {
            return Err(CandidateError::new(format!("n must be non-negative, got {n}")));
        }
        let (mut a, mut b) = (0u64, 1u64);
        for _ in 0..n {
            (a, b) = (b, a.wrapping_add(b));
        }
        Ok(json!(a))
    }
}
submit_solution!("fibonacci", fibonacci::solution);

// ============================================================================
// Allocation-heavy
// ============================================================================

mod build_list {
    use super::*;

    /// List of the first `n` squares
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let n = args.require_i64(0, "n")?;
        Ok(Value::Array((0..n).map(|i| json!(i * i)).collect()))
    }
}
submit_solution!("build_list", build_list::solution);

mod word_count {
    use super::*;

    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let text = args
            .get(0, "text")
            .and_then(Value::as_str)
            .ok_or_else(|| CandidateError::new("missing string argument 'text'"))?;

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for word in text.split_whitespace() {
            *counts.entry(word).or_default() += 1;
        }
        Ok(json!(counts))
    }

    /// Not an entry point; shows up with `list --all`
    pub fn tokenize(args: &Arguments) -> Result<Value, CandidateError> {
        let text = args.get(0, "text").and_then(Value::as_str).unwrap_or_default();
        Ok(json!(text.split_whitespace().collect::<Vec<_>>()))
    }
}
submit_solution!("word_count", word_count::solution);
submit_solution!("word_count", "tokenize", word_count::tokenize);

mod scratch_buffer {
    use super::*;

    /// Allocates a temporary buffer and returns only its checksum
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let size = args.require_i64(0, "size")?.max(0) as usize;
        let buffer: Vec<u8> = black_box((0..size).map(|i| i as u8).collect());
        Ok(json!(buffer.iter().map(|&b| b as u64).sum::<u64>()))
    }
}
submit_solution!("scratch_buffer", scratch_buffer::solution);

// ============================================================================
// Failures
// ============================================================================

mod always_fails {
    use super::*;

    pub fn solution(_: &Arguments) -> Result<Value, CandidateError> {
        Err(CandidateError::new("this solution always fails"))
    }
}
submit_solution!("always_fails", always_fails::solution);

mod divide {
    use super::*;

    /// Panics on division by zero, which is reported as a failure
    pub fn solution(args: &Arguments) -> Result<Value, CandidateError> {
        let a = args.require_i64(0, "a")?;
        let b = args.require_i64(1, "b")?;
        Ok(json!(a / b))
    }
}
submit_solution!("divide", divide::solution);

fn main() {
    // Every solution registered above is discovered via inventory
    if let Err(e) = solbench::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
