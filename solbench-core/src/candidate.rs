//! Candidate Callables and Call Arguments
//!
//! A [`Candidate`] is the unit of logic under measurement. It receives the
//! same [`Arguments`] on every invocation and returns a JSON value.
//!
//! Callers choose the call shape explicitly with [`Payload`]. The legacy
//! shape-inference rule ([`Payload::infer`]) is kept for transports that only
//! carry a bare value, but it is ambiguous: a JSON array meant as ONE
//! positional list argument is spread into several positional arguments.
//! Use [`Payload::Single`] for that case.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::panic::Location;
use thiserror::Error;

/// Error raised by a candidate during an invocation
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CandidateError {
    /// Human-readable message
    pub message: String,
    location: &'static Location<'static>,
}

impl CandidateError {
    /// Create an error with the given message, recording the caller's location
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// Source location where the error was raised
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

// Errors compare by message; the raise site is diagnostic only
impl PartialEq for CandidateError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for CandidateError {}

/// Failure anywhere inside a measured invocation
#[derive(Debug, Clone, Error)]
pub enum ExecutionError {
    /// The candidate returned an error
    #[error(transparent)]
    Candidate(#[from] CandidateError),

    /// The candidate panicked
    #[error("candidate panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text
        message: String,
    },
}

impl ExecutionError {
    /// Build a [`ExecutionError::Panicked`] from a `catch_unwind` payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        ExecutionError::Panicked { message }
    }
}

/// Positional and keyword arguments for one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    /// Positional arguments, in call order
    pub positional: Vec<Value>,
    /// Keyword arguments
    pub keyword: Map<String, Value>,
}

impl Arguments {
    /// Positional argument at `index`
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword argument named `name`
    pub fn kwarg(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Positional argument at `index`, falling back to keyword `name`
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.arg(index).or_else(|| self.kwarg(name))
    }

    /// Like [`Arguments::get`] but as an `i64`, with a candidate-facing error
    #[track_caller]
    pub fn require_i64(&self, index: usize, name: &str) -> Result<i64, CandidateError> {
        match self.get(index, name).and_then(Value::as_i64) {
            Some(value) => Ok(value),
            None => Err(CandidateError::new(format!(
                "missing integer argument '{name}'"
            ))),
        }
    }
}

/// Call shape requested by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Spread a sequence into positional arguments
    Positional(Vec<Value>),
    /// Pass a mapping as keyword arguments
    Named(Map<String, Value>),
    /// Pass one value as the only positional argument
    Single(Value),
}

impl Payload {
    /// Infer the call shape from the payload's JSON type.
    ///
    /// Arrays become positional arguments, objects become keyword arguments,
    /// everything else is a single positional argument.
    pub fn infer(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::Positional(items),
            Value::Object(map) => Payload::Named(map),
            other => Payload::Single(other),
        }
    }

    /// Convert into call arguments
    pub fn adapt(self) -> Arguments {
        match self {
            Payload::Positional(positional) => Arguments {
                positional,
                keyword: Map::new(),
            },
            Payload::Named(keyword) => Arguments {
                positional: Vec::new(),
                keyword,
            },
            Payload::Single(value) => Arguments {
                positional: vec![value],
                keyword: Map::new(),
            },
        }
    }
}

/// How a bare payload value should be shaped into a [`Payload`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// Decide from the JSON type ([`Payload::infer`])
    #[default]
    Auto,
    /// Value must be an array; spread it positionally
    Positional,
    /// Value must be an object; pass it as keywords
    Named,
    /// Pass the value as the only positional argument
    Single,
}

impl PayloadShape {
    /// Shape `value` into a payload.
    ///
    /// Fails when an explicit shape does not match the value's JSON type.
    pub fn apply(self, value: Value) -> Result<Payload, String> {
        match (self, value) {
            (PayloadShape::Auto, value) => Ok(Payload::infer(value)),
            (PayloadShape::Single, value) => Ok(Payload::Single(value)),
            (PayloadShape::Positional, Value::Array(items)) => Ok(Payload::Positional(items)),
            (PayloadShape::Named, Value::Object(map)) => Ok(Payload::Named(map)),
            (PayloadShape::Positional, other) => {
                Err(format!("positional payload must be an array, got {other}"))
            }
            (PayloadShape::Named, other) => {
                Err(format!("named payload must be an object, got {other}"))
            }
        }
    }
}

impl std::str::FromStr for PayloadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PayloadShape::Auto),
            "positional" | "args" => Ok(PayloadShape::Positional),
            "named" | "kwargs" => Ok(PayloadShape::Named),
            "single" => Ok(PayloadShape::Single),
            other => Err(format!("Unknown payload shape: {}", other)),
        }
    }
}

/// A unit of logic that can be benchmarked.
///
/// Candidates are invoked many times with identical arguments and are
/// expected to be idempotent with respect to them. Nothing enforces this;
/// side-effecting candidates produce skewed measurements.
pub trait Candidate {
    /// Invoke the candidate once
    fn call(&self, args: &Arguments) -> Result<Value, CandidateError>;

    /// Reclaim garbage left by previous invocations.
    ///
    /// Samplers call this between phases to isolate measurements. Native
    /// Rust candidates free memory on drop, so the default does nothing;
    /// candidates backed by a collected runtime should force a full cycle.
    fn reclaim(&self) {}
}

impl<F> Candidate for F
where
    F: Fn(&Arguments) -> Result<Value, CandidateError>,
{
    fn call(&self, args: &Arguments) -> Result<Value, CandidateError> {
        self(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_mapping() {
        let args = Payload::infer(json!({"a": 1})).adapt();
        assert!(args.positional.is_empty());
        assert_eq!(args.kwarg("a"), Some(&json!(1)));
        assert_eq!(args.keyword.len(), 1);
    }

    #[test]
    fn test_infer_sequence() {
        let args = Payload::infer(json!([1, 2, 3])).adapt();
        assert_eq!(args.positional, vec![json!(1), json!(2), json!(3)]);
        assert!(args.keyword.is_empty());
    }

    #[test]
    fn test_infer_scalar() {
        let args = Payload::infer(json!(5)).adapt();
        assert_eq!(args.positional, vec![json!(5)]);
        assert!(args.keyword.is_empty());

        let args = Payload::infer(Value::Null).adapt();
        assert_eq!(args.positional, vec![Value::Null]);
    }

    #[test]
    fn test_single_keeps_list_intact() {
        let args = Payload::Single(json!([1, 2, 3])).adapt();
        assert_eq!(args.positional, vec![json!([1, 2, 3])]);
    }

    #[test]
    fn test_shape_apply() {
        assert_eq!(
            PayloadShape::Auto.apply(json!([1])).unwrap(),
            Payload::Positional(vec![json!(1)])
        );
        assert_eq!(
            PayloadShape::Single.apply(json!({"a": 1})).unwrap(),
            Payload::Single(json!({"a": 1}))
        );
        assert!(PayloadShape::Positional.apply(json!(3)).is_err());
        assert!(PayloadShape::Named.apply(json!([3])).is_err());
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("kwargs".parse::<PayloadShape>(), Ok(PayloadShape::Named));
        assert_eq!("Single".parse::<PayloadShape>(), Ok(PayloadShape::Single));
        assert!("spread".parse::<PayloadShape>().is_err());
    }

    #[test]
    fn test_argument_lookup() {
        let args = Payload::infer(json!({"n": 7})).adapt();
        assert_eq!(args.require_i64(0, "n"), Ok(7));
        assert!(args.require_i64(0, "m").is_err());
    }

    #[test]
    fn test_closure_is_candidate() {
        let double = |args: &Arguments| -> Result<Value, CandidateError> {
            Ok(json!(args.require_i64(0, "x")? * 2))
        };
        let boxed: Box<dyn Candidate> = Box::new(double);
        let args = Payload::Single(json!(21)).adapt();
        assert_eq!(boxed.call(&args), Ok(json!(42)));
    }

    #[test]
    fn test_error_records_raise_site() {
        let err = CandidateError::new("bad input");
        assert_eq!(err.location().file(), file!());
        assert_eq!(err.location().line(), line!() - 2);

        let args = Payload::Single(json!("text")).adapt();
        let err = args.require_i64(0, "n").unwrap_err();
        assert_eq!(err.location().file(), file!());
        assert_eq!(err, CandidateError::new("missing integer argument 'n'"));
    }

    #[test]
    fn test_panic_payload_message() {
        let err = ExecutionError::from_panic(Box::new("boom"));
        assert_eq!(err.to_string(), "candidate panicked: boom");

        let err = ExecutionError::from_panic(Box::new(String::from("bang")));
        assert!(matches!(err, ExecutionError::Panicked { ref message } if message == "bang"));
    }
}
