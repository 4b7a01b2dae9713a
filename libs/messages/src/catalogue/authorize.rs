//! Authorize: present a credential for authorization
//!
//! Certificate material rides along as opaque validated payloads; this layer
//! stores and round-trips it without interpreting the contents.

use codec::field::{optional, optional_vec, parse_string};
use codec::wire::{put_opt, read_nested, JsonRead, JsonWrite};
use codec::{CodecError, Ext, JsonObject};
use serde_json::Value;
use types::{
    combine, hash_opt, hash_set, multiset_eq, AuthorizationStatus, IdToken, IdTokenInfo,
    StableHash,
};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::{ResponseResult, ResultKind};

/// Request authorization of an id token.
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub id_token: IdToken,
    /// PEM-encoded certificate chain, opaque to this layer.
    pub certificate: Option<String>,
    /// ISO 15118 certificate hash entries, opaque and set-like.
    pub iso15118_certificate_hash_data: Vec<String>,
}

impl AuthorizeRequest {
    pub fn new(id_token: IdToken) -> Self {
        Self {
            id_token,
            certificate: None,
            iso15118_certificate_hash_data: Vec::new(),
        }
    }

    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    /// Attach certificate hash data, dropping exact duplicates.
    pub fn with_certificate_hash_data(mut self, entries: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !deduped.contains(&entry) {
                deduped.push(entry);
            }
        }
        self.iso15118_certificate_hash_data = deduped;
        self
    }
}

impl PartialEq for AuthorizeRequest {
    fn eq(&self, other: &Self) -> bool {
        self.id_token == other.id_token
            && self.certificate == other.certificate
            && multiset_eq(
                &self.iso15118_certificate_hash_data,
                &other.iso15118_certificate_hash_data,
            )
    }
}

impl MessagePayload for AuthorizeRequest {
    const ACTION: &'static str = "Authorize";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/authorizeRequest";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("idToken".to_string(), self.id_token.write_json(ext));
        put_opt(obj, "certificate", self.certificate.clone().map(Value::String));
        if !self.iso15118_certificate_hash_data.is_empty() {
            obj.insert(
                "iso15118CertificateHashData".to_string(),
                Value::Array(
                    self.iso15118_certificate_hash_data
                        .iter()
                        .map(|e| Value::String(e.clone()))
                        .collect(),
                ),
            );
        }
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let mut request = Self::new(read_nested(obj, "idToken", "the id token", ext)?)
            .with_certificate_hash_data(optional_vec(
                obj,
                "iso15118CertificateHashData",
                "the certificate hash data",
                parse_string,
            )?);
        request.certificate = optional(obj, "certificate", "the certificate chain", parse_string)?;
        Ok(request)
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.id_token.stable_hash(),
            hash_opt(&self.certificate),
            hash_set(&self.iso15118_certificate_hash_data),
        ])
    }
}

impl RequestPayload for AuthorizeRequest {}

/// Verdict on an authorization request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizeResponse {
    pub id_token_info: IdTokenInfo,
    /// Certificate verification status, opaque to this layer.
    pub certificate_status: Option<String>,
}

impl AuthorizeResponse {
    pub fn new(id_token_info: IdTokenInfo) -> Self {
        Self {
            id_token_info,
            certificate_status: None,
        }
    }
}

impl MessagePayload for AuthorizeResponse {
    const ACTION: &'static str = "Authorize";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/authorizeResponse";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("idTokenInfo".to_string(), self.id_token_info.write_json(ext));
        put_opt(
            obj,
            "certificateStatus",
            self.certificate_status.clone().map(Value::String),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            id_token_info: read_nested(obj, "idTokenInfo", "the id token info", ext)?,
            certificate_status: optional(
                obj,
                "certificateStatus",
                "the certificate status",
                parse_string,
            )?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.id_token_info.stable_hash(),
            hash_opt(&self.certificate_status),
        ])
    }
}

impl ResponsePayload for AuthorizeResponse {
    type Request = AuthorizeRequest;

    fn rejected(result: &ResponseResult) -> Self {
        let status = match result.kind {
            ResultKind::SignatureError => AuthorizationStatus::SignatureError,
            ResultKind::FormationViolation => AuthorizationStatus::ParsingError,
            _ => AuthorizationStatus::Invalid,
        };
        Self::new(IdTokenInfo::error(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::IdTokenType;

    #[test]
    fn certificate_hash_data_is_set_like() {
        let token = IdToken::new("04E1A2B3", IdTokenType::Iso14443);
        let a = AuthorizeRequest::new(token.clone())
            .with_certificate_hash_data(vec!["h1".into(), "h2".into(), "h1".into()]);
        assert_eq!(a.iso15118_certificate_hash_data.len(), 2);

        let b = AuthorizeRequest::new(token)
            .with_certificate_hash_data(vec!["h2".into(), "h1".into()]);
        assert_eq!(a, b);
        assert_eq!(a.stable_hash(), b.stable_hash());
    }

    #[test]
    fn rejected_payload_matches_the_failure_kind() {
        let parsing = AuthorizeResponse::rejected(&ResponseResult::formation_violation("bad"));
        assert_eq!(parsing.id_token_info.status, AuthorizationStatus::ParsingError);

        let signature = AuthorizeResponse::rejected(&ResponseResult::signature_error("bad"));
        assert_eq!(
            signature.id_token_info.status,
            AuthorizationStatus::SignatureError
        );

        let declined = AuthorizeResponse::rejected(&ResponseResult::failed(None));
        assert_eq!(declined.id_token_info.status, AuthorizationStatus::Invalid);
    }
}
