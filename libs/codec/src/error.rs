//! Codec-level errors for wire-document parsing
//!
//! Every failure mode of the field-contract engine maps to one variant here.
//! Parsers return these as values; a malformed document never causes a panic
//! or an unwind across the message boundary.

use thiserror::Error;

/// Errors produced while parsing a wire document against a field contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A mandatory property is absent from the document.
    #[error("missing required property '{property}': {description}")]
    MissingProperty {
        property: &'static str,
        description: &'static str,
    },

    /// A property is present but its value failed the field's parser.
    #[error("{description} invalid: {reason}")]
    InvalidProperty {
        description: &'static str,
        reason: String,
    },

    /// The document root (or a nested value that must be an object) is not a
    /// JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

impl CodecError {
    /// Short name of the JSON type of a value, for diagnostics.
    pub fn json_type_name(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}
