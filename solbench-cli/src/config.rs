//! Configuration loading from solbench.toml
//!
//! SolBench configuration can be specified in a `solbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use solbench_core::BenchmarkConfig;
use std::path::Path;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "solbench.toml";

/// SolBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SolConfig {
    /// Sampling configuration
    #[serde(default)]
    pub runner: BenchmarkConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Include the candidate's result value in reports
    #[serde(default = "default_include_result")]
    pub include_result: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            include_result: default_include_result(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_include_result() -> bool {
    true
}

impl SolConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SolBench Configuration

[runner]
# Measured timing runs per benchmark
num_runs = 100
# Discarded warm-up runs before timing
warmup_runs = 10
# Memory samples (one traced invocation each)
memory_samples = 10
# Pin the measuring thread to a CPU (uncomment to enable)
# pin_cpu = 0

[output]
# Default output format: human or json
format = "human"
# Include the candidate's result value in reports
include_result = true
"#
        .to_string()
    }
}
