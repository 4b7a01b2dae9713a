//! Wire codec for signature records
//!
//! The verification status is local metadata and never appears on the wire;
//! algorithm, signing method and encoding method fall back to their
//! documented defaults when omitted.

use super::{expect_object, optional, parse_string, required, JsonRead, JsonWrite};
use crate::error::CodecError;
use crate::extensions::Ext;
use serde_json::Value;
use types::Signature;

const NESTED: &str = "signature";

impl JsonRead for Signature {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let signature = Signature {
            key_id: required(obj, "keyId", "the signing key identifier", parse_string)?,
            value: required(obj, "value", "the signature value", parse_string)?,
            algorithm: optional(obj, "algorithm", "the signing algorithm", parse_string)?
                .unwrap_or_else(|| Signature::DEFAULT_ALGORITHM.to_string()),
            signing_method: optional(obj, "signingMethod", "the signing method", parse_string)?
                .unwrap_or_else(|| Signature::DEFAULT_SIGNING_METHOD.to_string()),
            encoding_method: optional(obj, "encodingMethod", "the encoding method", parse_string)?
                .unwrap_or_else(|| Signature::DEFAULT_ENCODING_METHOD.to_string()),
            status: None,
        };
        Ok(ext.after_parse(NESTED, obj, signature))
    }
}

impl JsonWrite for Signature {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = super::JsonObject::new();
        obj.insert("keyId".to_string(), Value::String(self.key_id.clone()));
        obj.insert("value".to_string(), Value::String(self.value.clone()));
        obj.insert("algorithm".to_string(), Value::String(self.algorithm.clone()));
        obj.insert(
            "signingMethod".to_string(),
            Value::String(self.signing_method.clone()),
        );
        obj.insert(
            "encodingMethod".to_string(),
            Value::String(self.encoding_method.clone()),
        );
        Value::Object(ext.before_serialize(NESTED, obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_methods_fall_back_to_defaults() {
        let ext = Ext::disabled("Authorize");
        let parsed =
            Signature::read_json(&json!({ "keyId": "key-1", "value": "AAAA" }), &ext).unwrap();
        assert_eq!(parsed.algorithm, "secp256r1");
        assert_eq!(parsed.signing_method, "json");
        assert_eq!(parsed.encoding_method, "base64");
        assert!(parsed.status.is_none());
    }

    #[test]
    fn key_id_is_mandatory() {
        let ext = Ext::disabled("Authorize");
        let err = Signature::read_json(&json!({ "value": "AAAA" }), &ext).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required property 'keyId': the signing key identifier"
        );
    }
}
