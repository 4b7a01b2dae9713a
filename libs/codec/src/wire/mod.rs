//! JSON wire encoding of nested protocol objects
//!
//! Each nested object implements [`JsonRead`] and [`JsonWrite`] as a flat
//! field contract. Conventions, enforced uniformly:
//!
//! - wire keys are fixed lower-camel-case names
//! - absent optional fields are omitted entirely; no `null` placeholders
//! - every implementation consults the extension registry after parsing and
//!   before serialization, under its own nested-object name
//!
//! Parsing is total: malformed nested documents surface as [`CodecError`]
//! values with the nested description folded into the reason.

use crate::error::CodecError;
use crate::extensions::Ext;
use crate::field::{self, JsonObject};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

mod custom_data;
mod idtoken;
mod metering;
mod signature;
mod station;

/// Serialize a value to its JSON wire form.
pub trait JsonWrite {
    fn write_json(&self, ext: &Ext<'_>) -> Value;
}

/// Parse a value from its JSON wire form.
pub trait JsonRead: Sized {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError>;
}

/// Extract a mandatory nested object field.
pub fn read_nested<T: JsonRead>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    ext: &Ext<'_>,
) -> Result<T, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Err(CodecError::MissingProperty {
            property,
            description,
        }),
        Some(value) => T::read_json(value, ext).map_err(|e| CodecError::InvalidProperty {
            description,
            reason: e.to_string(),
        }),
    }
}

/// Extract an optional nested object field; absence is `Ok(None)`.
pub fn read_opt_nested<T: JsonRead>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    ext: &Ext<'_>,
) -> Result<Option<T>, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::read_json(value, ext)
            .map(Some)
            .map_err(|e| CodecError::InvalidProperty {
                description,
                reason: e.to_string(),
            }),
    }
}

/// Extract a mandatory array of nested objects, preserving element order.
pub fn read_vec<T: JsonRead>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    ext: &Ext<'_>,
) -> Result<Vec<T>, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Err(CodecError::MissingProperty {
            property,
            description,
        }),
        Some(value) => read_elements(value, ext).map_err(|reason| CodecError::InvalidProperty {
            description,
            reason,
        }),
    }
}

/// Extract an optional array of nested objects; absence yields the
/// documented default of an empty sequence.
pub fn read_opt_vec<T: JsonRead>(
    obj: &JsonObject,
    property: &'static str,
    description: &'static str,
    ext: &Ext<'_>,
) -> Result<Vec<T>, CodecError> {
    match obj.get(property) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => read_elements(value, ext).map_err(|reason| CodecError::InvalidProperty {
            description,
            reason,
        }),
    }
}

fn read_elements<T: JsonRead>(value: &Value, ext: &Ext<'_>) -> Result<Vec<T>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("expected array, got {}", CodecError::json_type_name(value)))?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        out.push(T::read_json(item, ext).map_err(|e| format!("element {index}: {e}"))?);
    }
    Ok(out)
}

/// Serialize a sequence of nested objects, preserving order.
pub fn write_vec<T: JsonWrite>(items: &[T], ext: &Ext<'_>) -> Value {
    Value::Array(items.iter().map(|item| item.write_json(ext)).collect())
}

/// Wire form of a string-coded enumeration value.
pub fn enum_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Wire form of a timestamp: RFC 3339 in UTC with millisecond precision.
pub fn timestamp_value(at: &DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// View a wire value as an object, or fail with the codec's type-mismatch
/// error.
pub fn expect_object(value: &Value) -> Result<&JsonObject, CodecError> {
    value.as_object().ok_or(CodecError::NotAnObject {
        found: CodecError::json_type_name(value),
    })
}

/// Insert `field` into `obj` only when present; absent optionals leave no
/// trace on the wire.
pub fn put_opt(obj: &mut JsonObject, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        obj.insert(key.to_string(), value);
    }
}

pub(crate) use field::{
    optional, parse_enum, parse_f64, parse_i8, parse_string, parse_timestamp, required,
};
