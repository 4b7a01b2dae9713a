//! Codec integration tests
//!
//! Exercises the public API the way the `messages` crate consumes it: field
//! contracts driving nested-object parsing, extension hooks rewriting
//! results, and the fixed error surface for malformed documents.

use codec::field::{optional, parse_u32, required};
use codec::{CodecError, Ext, ExtensionRegistry, JsonObject, JsonRead, JsonWrite};
use serde_json::json;
use types::{CustomData, IdToken, IdTokenType, MeterValue, SampledValue};

fn obj(value: serde_json::Value) -> JsonObject {
    value.as_object().cloned().expect("test document is an object")
}

#[test]
fn every_mandatory_error_carries_a_description() {
    let doc = obj(json!({}));
    let err = required(&doc, "evseId", "the EVSE identifier", parse_u32).unwrap_err();
    assert!(!err.to_string().is_empty());
    assert!(err.to_string().contains("evseId"));
    assert!(err.to_string().contains("the EVSE identifier"));
}

#[test]
fn optional_absence_is_not_an_error() {
    let doc = obj(json!({}));
    assert_eq!(
        optional(&doc, "evseId", "the EVSE identifier", parse_u32).unwrap(),
        None
    );
}

#[test]
fn nested_parse_errors_propagate_through_composites() {
    let ext = Ext::disabled("MeterValues");
    let err = MeterValue::read_json(
        &json!({
            "timestamp": "2026-03-01T12:00:00Z",
            "sampledValue": [{ "value": 1.0 }, { "value": "broken" }]
        }),
        &ext,
    )
    .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("element 1"), "{text}");
    assert!(text.contains("the measured value invalid"), "{text}");
}

#[test]
fn parse_hook_can_annotate_a_nested_token() {
    let mut registry = ExtensionRegistry::new();
    registry.register_parse_hook(
        "Authorize",
        "idToken",
        |raw: &JsonObject, mut token: IdToken| {
            // Vendor extension: a legacy field carrying the token in
            // lowercase wins over the standard one.
            if let Some(legacy) = raw.get("x-legacyUid").and_then(|v| v.as_str()) {
                token.value = legacy.to_uppercase();
            }
            token
        },
    );
    let ext = Ext::new(&registry, "Authorize");

    let parsed = IdToken::read_json(
        &json!({ "idToken": "FFFF", "type": "ISO14443", "x-legacyUid": "04e1a2b3" }),
        &ext,
    )
    .unwrap();
    assert_eq!(parsed.value, "04E1A2B3");
    assert_eq!(parsed.kind, IdTokenType::Iso14443);
}

#[test]
fn serialize_hook_sees_the_finished_object() {
    let mut registry = ExtensionRegistry::new();
    registry.register_serialize_hook("MeterValues", "sampledValue", |mut obj| {
        obj.insert("x-calibrated".to_string(), json!(true));
        obj
    });
    let ext = Ext::new(&registry, "MeterValues");

    let wire = SampledValue::new(42.0).write_json(&ext);
    assert_eq!(wire["value"], json!(42.0));
    assert_eq!(wire["x-calibrated"], json!(true));
}

#[test]
fn hooks_do_not_leak_across_actions() {
    let mut registry = ExtensionRegistry::new();
    registry.register_serialize_hook("MeterValues", "customData", |mut obj| {
        obj.insert("x-stamp".to_string(), json!(1));
        obj
    });
    let ext = Ext::new(&registry, "Authorize");
    let wire = CustomData::new("com.example").write_json(&ext);
    assert_eq!(wire, json!({ "vendorId": "com.example" }));
}

#[test]
fn malformed_root_is_rejected_not_panicked() {
    let ext = Ext::disabled("Authorize");
    let err = IdToken::read_json(&json!("just a string"), &ext).unwrap_err();
    assert_eq!(err, CodecError::NotAnObject { found: "string" });
}
