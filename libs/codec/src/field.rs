//! Field-contract engine
//!
//! Extracts one field at a time from a wire document. A field contract is a
//! property name, a human-readable description, a required/optional mode and
//! a leaf parser. The error surface is fixed:
//!
//! - a missing mandatory property reports the property name and description
//! - a failing parser reports `"<description> invalid: <reason>"` in both
//!   modes
//! - an absent optional property is `Ok(None)`; callers apply the documented
//!   default
//!
//! All functions here are pure over the input document; JSON `null` counts
//! as absent.

use crate::error::CodecError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One JSON wire document (or nested object) under extraction.
pub type JsonObject = serde_json::Map<String, Value>;

/// Extract a mandatory field.
pub fn required<T>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Result<T, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Err(CodecError::MissingProperty {
            property,
            description,
        }),
        Some(value) => parse(value).map_err(|reason| CodecError::InvalidProperty {
            description,
            reason,
        }),
    }
}

/// Extract an optional field; absence (or explicit `null`) is `Ok(None)`.
///
/// A present value runs the identical parser path as a mandatory field and
/// surfaces parser failures with the same error shape.
pub fn optional<T>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Result<Option<T>, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .map_err(|reason| CodecError::InvalidProperty {
                description,
                reason,
            }),
    }
}

/// Extract a mandatory array field, applying the element parser in order.
///
/// Element failures fold the element index into the reason.
pub fn required_vec<T>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Result<Vec<T>, CodecError> {
    required(obj, property, description, |value| {
        parse_elements(value, parse)
    })
}

/// Extract an optional array field; absence yields the documented default of
/// an empty sequence.
pub fn optional_vec<T>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Result<Vec<T>, CodecError> {
    Ok(optional(obj, property, description, |value| {
        parse_elements(value, parse)
    })?
    .unwrap_or_default())
}

fn parse_elements<T>(
    value: &Value,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("expected array, got {}", CodecError::json_type_name(value)))?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        out.push(parse(item).map_err(|reason| format!("element {index}: {reason}"))?);
    }
    Ok(out)
}

// Leaf parsers. Each returns a short reason string; the contract functions
// above wrap it into the fixed error surface.

pub fn parse_string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected string, got {}", CodecError::json_type_name(value)))
}

pub fn parse_bool(value: &Value) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected boolean, got {}", CodecError::json_type_name(value)))
}

pub fn parse_u32(value: &Value) -> Result<u32, String> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            format!(
                "expected unsigned 32-bit integer, got {}",
                CodecError::json_type_name(value)
            )
        })
}

pub fn parse_u64(value: &Value) -> Result<u64, String> {
    value.as_u64().ok_or_else(|| {
        format!(
            "expected unsigned integer, got {}",
            CodecError::json_type_name(value)
        )
    })
}

pub fn parse_i8(value: &Value) -> Result<i8, String> {
    value
        .as_i64()
        .and_then(|n| i8::try_from(n).ok())
        .ok_or_else(|| {
            format!(
                "expected small signed integer, got {}",
                CodecError::json_type_name(value)
            )
        })
}

pub fn parse_i32(value: &Value) -> Result<i32, String> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            format!(
                "expected signed 32-bit integer, got {}",
                CodecError::json_type_name(value)
            )
        })
}

pub fn parse_f64(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected number, got {}", CodecError::json_type_name(value)))
}

/// RFC 3339 timestamp, normalized to UTC.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    let text = value
        .as_str()
        .ok_or_else(|| format!("expected RFC 3339 string, got {}", CodecError::json_type_name(value)))?;
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("not an RFC 3339 timestamp: {e}"))
}

/// Parse a string-coded enumeration through its serde vocabulary.
pub fn parse_enum<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| format!("unknown enumeration value: {e}"))
}

/// View a value as a nested JSON object.
pub fn as_object(value: &Value) -> Result<&JsonObject, String> {
    value
        .as_object()
        .ok_or_else(|| format!("expected object, got {}", CodecError::json_type_name(value)))
}
