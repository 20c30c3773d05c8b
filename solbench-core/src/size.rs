//! Result Size Estimate
//!
//! Approximates the in-memory footprint of a candidate's return value.
//! This is a SHALLOW estimate: the value itself plus the buffer it directly
//! owns, and the same shallow size of each top-level element. The elements
//! of an array are its items; the elements of an object are its keys, each
//! sized as a string. Values inside objects and anything nested deeper are
//! undercounted.

use serde_json::Value;
use std::mem::size_of;

/// Size of `value` plus the heap buffer it directly owns
pub fn shallow_size(value: &Value) -> u64 {
    let inline = size_of::<Value>();
    let owned = match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        Value::String(s) => s.len(),
        Value::Array(items) => items.len() * size_of::<Value>(),
        Value::Object(map) => map
            .keys()
            .map(|key| size_of::<String>() + key.len() + size_of::<Value>())
            .sum(),
    };
    (inline + owned) as u64
}

/// Shallow size of a string value holding `s`
fn string_size(s: &str) -> u64 {
    (size_of::<Value>() + s.len()) as u64
}

/// Shallow size of a result, including its top-level elements.
///
/// Strings are not treated as containers.
pub fn result_size(value: &Value) -> u64 {
    let elements: u64 = match value {
        Value::Array(items) => items.iter().map(shallow_size).sum(),
        Value::Object(map) => map.keys().map(|key| string_size(key)).sum(),
        _ => 0,
    };
    shallow_size(value) + elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const V: u64 = size_of::<Value>() as u64;

    #[test]
    fn test_scalar_size() {
        assert_eq!(result_size(&json!(42)), V);
        assert_eq!(result_size(&Value::Null), V);
    }

    #[test]
    fn test_string_is_not_a_container() {
        assert_eq!(result_size(&json!("abcd")), V + 4);
    }

    #[test]
    fn test_array_counts_top_level_elements() {
        // Outer value + 3 slots, then each element's shallow size
        let value = json!([1, 2, "xy"]);
        assert_eq!(result_size(&value), (V + 3 * V) + V + V + (V + 2));
    }

    #[test]
    fn test_nested_values_are_undercounted() {
        let shallow = result_size(&json!([[1, 2, 3, 4, 5, 6, 7, 8]]));
        let flat = result_size(&json!([1, 2, 3, 4, 5, 6, 7, 8]));
        assert!(shallow < flat);
    }

    #[test]
    fn test_object_counts_keys() {
        let value = json!({"ab": 1});
        let entry = size_of::<String>() as u64 + 2 + V;
        // Outer value + entry, then the key sized as a string
        assert_eq!(result_size(&value), V + entry + (V + 2));

        // Values do not contribute beyond their slot
        let large = json!({"ab": "x".repeat(1000)});
        assert_eq!(result_size(&large), result_size(&value));
    }
}
