//! Wire codec for authorization tokens and their verdicts

use super::{
    expect_object, optional, parse_enum, parse_i8, parse_string, parse_timestamp, put_opt,
    read_opt_nested, read_opt_vec, required, timestamp_value, write_vec, JsonRead, JsonWrite,
};
use crate::error::CodecError;
use crate::extensions::Ext;
use crate::field::JsonObject;
use serde_json::Value;
use types::{AdditionalInfo, IdToken, IdTokenInfo};

impl JsonRead for AdditionalInfo {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let info = AdditionalInfo {
            additional_id_token: required(
                obj,
                "additionalIdToken",
                "the additional identification value",
                parse_string,
            )?,
            kind: required(obj, "type", "the additional identification type", parse_string)?,
        };
        Ok(ext.after_parse("additionalInfo", obj, info))
    }
}

impl JsonWrite for AdditionalInfo {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert(
            "additionalIdToken".to_string(),
            Value::String(self.additional_id_token.clone()),
        );
        obj.insert("type".to_string(), Value::String(self.kind.clone()));
        Value::Object(ext.before_serialize("additionalInfo", obj))
    }
}

impl JsonRead for IdToken {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let token = IdToken::new(
            required(obj, "idToken", "the identification token value", parse_string)?,
            required(obj, "type", "the identification token type", parse_enum)?,
        )
        // Construction dedupes: additional info is set-like.
        .with_additional_info(read_opt_vec(
            obj,
            "additionalInfo",
            "the additional identification entries",
            ext,
        )?);
        Ok(ext.after_parse("idToken", obj, token))
    }
}

impl JsonWrite for IdToken {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("idToken".to_string(), Value::String(self.value.clone()));
        obj.insert("type".to_string(), super::enum_value(&self.kind));
        if !self.additional_info.is_empty() {
            obj.insert(
                "additionalInfo".to_string(),
                write_vec(&self.additional_info, ext),
            );
        }
        Value::Object(ext.before_serialize("idToken", obj))
    }
}

impl JsonRead for IdTokenInfo {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let info = IdTokenInfo {
            status: required(obj, "status", "the authorization status", parse_enum)?,
            cache_expiry_date_time: optional(
                obj,
                "cacheExpiryDateTime",
                "the cache expiry timestamp",
                parse_timestamp,
            )?,
            charging_priority: optional(
                obj,
                "chargingPriority",
                "the charging priority",
                parse_i8,
            )?,
            group_id_token: read_opt_nested(obj, "groupIdToken", "the group id token", ext)?,
            language1: optional(obj, "language1", "the preferred language", parse_string)?,
            language2: optional(obj, "language2", "the fallback language", parse_string)?,
            personal_message: optional(
                obj,
                "personalMessage",
                "the personal display message",
                parse_string,
            )?,
        };
        Ok(ext.after_parse("idTokenInfo", obj, info))
    }
}

impl JsonWrite for IdTokenInfo {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("status".to_string(), super::enum_value(&self.status));
        put_opt(
            &mut obj,
            "cacheExpiryDateTime",
            self.cache_expiry_date_time.as_ref().map(timestamp_value),
        );
        put_opt(
            &mut obj,
            "chargingPriority",
            self.charging_priority.map(|p| Value::from(p as i64)),
        );
        put_opt(
            &mut obj,
            "groupIdToken",
            self.group_id_token.as_ref().map(|t| t.write_json(ext)),
        );
        put_opt(
            &mut obj,
            "language1",
            self.language1.clone().map(Value::String),
        );
        put_opt(
            &mut obj,
            "language2",
            self.language2.clone().map(Value::String),
        );
        put_opt(
            &mut obj,
            "personalMessage",
            self.personal_message.clone().map(Value::String),
        );
        Value::Object(ext.before_serialize("idTokenInfo", obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use types::{AuthorizationStatus, IdTokenType};

    #[test]
    fn id_token_round_trip_omits_absent_optionals() {
        let ext = Ext::disabled("Authorize");
        let token = IdToken::new("04E1A2B3", IdTokenType::Iso14443);
        let wire = token.write_json(&ext);
        assert_eq!(wire, json!({ "idToken": "04E1A2B3", "type": "ISO14443" }));
        assert_eq!(IdToken::read_json(&wire, &ext).unwrap(), token);
    }

    #[test]
    fn unknown_token_type_is_a_field_error() {
        let ext = Ext::disabled("Authorize");
        let err = IdToken::read_json(
            &json!({ "idToken": "04E1A2B3", "type": "Telepathy" }),
            &ext,
        )
        .unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("the identification token type invalid:"), "{text}");
    }

    #[test]
    fn wire_duplicates_in_additional_info_are_deduplicated() {
        let ext = Ext::disabled("Authorize");
        let parsed = IdToken::read_json(
            &json!({
                "idToken": "04E1A2B3",
                "type": "ISO14443",
                "additionalInfo": [
                    { "additionalIdToken": "x", "type": "issuer" },
                    { "additionalIdToken": "x", "type": "issuer" }
                ]
            }),
            &ext,
        )
        .unwrap();
        assert_eq!(parsed.additional_info.len(), 1);
    }

    #[test]
    fn id_token_info_round_trip() {
        let ext = Ext::disabled("Authorize");
        let info = IdTokenInfo {
            charging_priority: Some(2),
            ..IdTokenInfo::new(AuthorizationStatus::Accepted)
        };
        let wire = info.write_json(&ext);
        assert_eq!(wire["status"], json!("Accepted"));
        assert_eq!(wire["chargingPriority"], json!(2));
        assert!(wire.get("groupIdToken").is_none());
        assert_eq!(IdTokenInfo::read_json(&wire, &ext).unwrap(), info);
    }
}
