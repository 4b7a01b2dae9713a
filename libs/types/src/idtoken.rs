//! Authorization identifiers and their status vocabulary

use crate::hashing::{combine, hash_opt, hash_set, multiset_eq, StableHash};
use serde::{Deserialize, Serialize};

/// The kind of credential an [`IdToken`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdTokenType {
    Central,
    #[serde(rename = "eMAID")]
    EMaid,
    #[serde(rename = "ISO14443")]
    Iso14443,
    #[serde(rename = "ISO15693")]
    Iso15693,
    KeyCode,
    Local,
    MacAddress,
    NoAuthorization,
}

impl StableHash for IdTokenType {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Extra identification attached to an id token by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    pub additional_id_token: String,
    /// Issuer-defined type of the additional id.
    #[serde(rename = "type")]
    pub kind: String,
}

impl StableHash for AdditionalInfo {
    fn stable_hash(&self) -> u64 {
        combine(&[self.additional_id_token.stable_hash(), self.kind.stable_hash()])
    }
}

/// A credential presented for authorization.
///
/// Additional-info entries are naturally set-like: they are deduplicated at
/// construction and compare as a multiset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdToken {
    /// The credential value itself, e.g. an RFID UID or eMAID.
    #[serde(rename = "idToken")]
    pub value: String,
    #[serde(rename = "type")]
    pub kind: IdTokenType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<AdditionalInfo>,
}

impl IdToken {
    pub fn new(value: impl Into<String>, kind: IdTokenType) -> Self {
        Self {
            value: value.into(),
            kind,
            additional_info: Vec::new(),
        }
    }

    /// Attach additional info, dropping exact duplicates.
    pub fn with_additional_info(mut self, info: Vec<AdditionalInfo>) -> Self {
        let mut deduped: Vec<AdditionalInfo> = Vec::with_capacity(info.len());
        for entry in info {
            if !deduped.contains(&entry) {
                deduped.push(entry);
            }
        }
        self.additional_info = deduped;
        self
    }
}

impl PartialEq for IdToken {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.kind == other.kind
            && multiset_eq(&self.additional_info, &other.additional_info)
    }
}

impl StableHash for IdToken {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.value.stable_hash(),
            self.kind.stable_hash(),
            hash_set(&self.additional_info),
        ])
    }
}

/// Outcome of authorizing an id token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    Accepted,
    Blocked,
    ConcurrentTx,
    Expired,
    Invalid,
    NoCredit,
    #[serde(rename = "NotAllowedTypeEVSE")]
    NotAllowedTypeEvse,
    NotAtThisLocation,
    NotAtThisTime,
    Unknown,
    /// The request document could not be parsed; used by error responses.
    ParsingError,
    /// The request signature failed verification; used by error responses.
    SignatureError,
}

impl AuthorizationStatus {
    /// Whether this status denies the presented token.
    pub fn is_denied(&self) -> bool {
        !matches!(self, Self::Accepted)
    }
}

impl StableHash for AuthorizationStatus {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Authorization verdict plus the caching and priority metadata that
/// accompanies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTokenInfo {
    pub status: AuthorizationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_expiry_date_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_priority: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id_token: Option<IdToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_message: Option<String>,
}

impl IdTokenInfo {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status,
            cache_expiry_date_time: None,
            charging_priority: None,
            group_id_token: None,
            language1: None,
            language2: None,
            personal_message: None,
        }
    }

    /// Deny-valued info for error responses (formation violations, signature
    /// failures), with all optional metadata absent.
    pub fn error(status: AuthorizationStatus) -> Self {
        Self::new(status)
    }
}

impl StableHash for IdTokenInfo {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.status.stable_hash(),
            hash_opt(&self.cache_expiry_date_time),
            hash_opt(&self.charging_priority),
            hash_opt(&self.group_id_token),
            hash_opt(&self.language1),
            hash_opt(&self.language2),
            hash_opt(&self.personal_message),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(token: &str, kind: &str) -> AdditionalInfo {
        AdditionalInfo {
            additional_id_token: token.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn additional_info_is_deduplicated_at_construction() {
        let token = IdToken::new("04E1A2B3", IdTokenType::Iso14443).with_additional_info(vec![
            info("x", "issuer"),
            info("x", "issuer"),
            info("y", "issuer"),
        ]);
        assert_eq!(token.additional_info.len(), 2);
    }

    #[test]
    fn additional_info_order_does_not_affect_equality() {
        let a = IdToken::new("04E1A2B3", IdTokenType::Iso14443)
            .with_additional_info(vec![info("x", "issuer"), info("y", "issuer")]);
        let b = IdToken::new("04E1A2B3", IdTokenType::Iso14443)
            .with_additional_info(vec![info("y", "issuer"), info("x", "issuer")]);
        assert_eq!(a, b);
        assert_eq!(a.stable_hash(), b.stable_hash());
    }

    #[test]
    fn token_type_wire_names() {
        assert_eq!(
            serde_json::to_value(IdTokenType::Iso14443).unwrap(),
            serde_json::json!("ISO14443")
        );
        assert_eq!(
            serde_json::to_value(IdTokenType::EMaid).unwrap(),
            serde_json::json!("eMAID")
        );
    }

    #[test]
    fn denied_statuses() {
        assert!(!AuthorizationStatus::Accepted.is_denied());
        assert!(AuthorizationStatus::ParsingError.is_denied());
        assert!(AuthorizationStatus::Invalid.is_denied());
    }
}
