//! Error types for the vacancy normalizer
//!
//! Field-level problems never surface here: they degrade to defaults inside
//! the normalizers. The only record-level failure is a payload that is not a
//! JSON object at all.

use serde_json::Value;
use thiserror::Error;

/// A raw payload that cannot be assembled into a vacancy
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Vacancy payload must be a JSON object, got {kind}")]
pub struct InvalidPayloadError {
    /// JSON kind of the rejected payload ("array", "string", ...)
    pub kind: &'static str,

    /// The offending payload, kept for logging
    pub payload: Value,
}

impl InvalidPayloadError {
    /// Build an error for the given non-object payload
    pub fn new(payload: &Value) -> Self {
        Self {
            kind: json_kind(payload),
            payload: payload.clone(),
        }
    }
}

/// Name of the JSON kind of a value
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
