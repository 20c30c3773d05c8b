//! JSON Output

use serde::Serialize;

/// Generate a prettified JSON report.
///
/// Accepts a single envelope, a bare report, or a batch (slice) of either.
pub fn generate_json_report<T>(report: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(report)
}
