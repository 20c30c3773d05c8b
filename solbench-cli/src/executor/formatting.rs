//! Output Formatting
//!
//! Human-readable output for benchmark envelopes: a status line per entry,
//! then timing and memory statistics, or the error text on failure.

use solbench_report::{BenchmarkReport, ReportEnvelope, format_bytes, format_duration};

/// Format envelopes for human-readable terminal display
pub fn format_human_output(envelopes: &[ReportEnvelope]) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("SolBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let mut passed = 0;
    for envelope in envelopes {
        match (&envelope.report, &envelope.error) {
            (Some(report), _) => {
                if report.success() {
                    passed += 1;
                }
                format_report(&mut output, &envelope.entry, report);
            }
            (None, error) => {
                output.push_str(&format!("  ⊘ {}\n", envelope.entry));
                output.push_str(&format!(
                    "      error: {}\n",
                    error.as_deref().unwrap_or("no report produced")
                ));
            }
        }
        output.push('\n');
    }

    if let Some(first) = envelopes.first() {
        let config = &first.meta.config;
        output.push_str(&format!(
            "runs: {}  warmup: {}  memory samples: {}\n",
            config.num_runs, config.warmup_runs, config.memory_samples
        ));
    }
    output.push_str(&format!("{}/{} succeeded\n", passed, envelopes.len()));

    output
}

fn format_report(output: &mut String, entry: &str, report: &BenchmarkReport) {
    let status_icon = if report.success() { "✓" } else { "✗" };
    output.push_str(&format!("  {} {}\n", status_icon, entry));

    if !report.success() {
        for line in report.error().unwrap_or_default().lines() {
            output.push_str(&format!("      {}\n", line));
        }
        return;
    }

    if let Some(result) = report.result() {
        let mut rendered = result.to_string();
        if rendered.len() > 60 {
            let cut = (0..=57).rev().find(|&i| rendered.is_char_boundary(i)).unwrap_or(0);
            rendered.truncate(cut);
            rendered.push_str("...");
        }
        output.push_str(&format!("      result: {}\n", rendered));
    }

    let timing = report.timing();
    output.push_str(&format!(
        "      mean: {}  median: {}  stddev: {}\n",
        format_duration(timing.mean_time()),
        format_duration(timing.median_time()),
        format_duration(timing.std_dev())
    ));
    output.push_str(&format!(
        "      min: {}  max: {}  total: {}\n",
        format_duration(timing.min_time()),
        format_duration(timing.max_time()),
        format_duration(timing.total_time())
    ));
    output.push_str(&format!(
        "      samples: {}  outliers: {}  cv: {:.2}%\n",
        timing.samples(),
        timing.outliers(),
        timing.cv_percent()
    ));

    let memory = report.memory();
    if memory.samples() > 0 {
        output.push_str(&format!(
            "      memory used: {} (median {})  peak: {} (median {})\n",
            format_bytes(memory.mean_used_bytes()),
            format_bytes(memory.median_used_bytes()),
            format_bytes(memory.mean_peak_bytes()),
            format_bytes(memory.median_peak_bytes())
        ));
        output.push_str(&format!(
            "      result size: {}\n",
            format_bytes(memory.result_size_bytes())
        ));
    }
}
