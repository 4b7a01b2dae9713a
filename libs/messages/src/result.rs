//! Machine-readable response outcomes
//!
//! Every response carries exactly one [`ResponseResult`]: success, or one of
//! the failure kinds a peer can branch on. The result is envelope metadata,
//! correlated and delivered alongside the JSON body rather than inside it,
//! like the request id and routing fields.

use serde_json::Value;
use types::{combine, hash_opt, StableHash};

/// The taxonomy of response outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// The request was understood and honored.
    Ok,
    /// The wire document violated the field contract (malformed request).
    FormationViolation,
    /// Signatures were present but failed verification; re-signing is
    /// required before any retry.
    SignatureError,
    /// A well-formed request the peer declines to honor.
    RequestError,
    /// Generic server-side failure.
    InternalError,
    /// An unexpected fault was converted at the response boundary.
    ExceptionOccurred,
}

impl StableHash for ResultKind {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Outcome value attached to every response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseResult {
    pub kind: ResultKind,
    /// Machine-readable rejection code, for [`ResultKind::RequestError`].
    pub code: Option<String>,
    /// Human-readable description of the failure.
    pub description: Option<String>,
    /// Optional structured detail accompanying a rejection.
    pub details: Option<Value>,
}

impl ResponseResult {
    pub fn ok() -> Self {
        Self {
            kind: ResultKind::Ok,
            code: None,
            description: None,
            details: None,
        }
    }

    pub fn formation_violation(description: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::FormationViolation,
            code: None,
            description: Some(description.into()),
            details: None,
        }
    }

    pub fn signature_error(description: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::SignatureError,
            code: None,
            description: Some(description.into()),
            details: None,
        }
    }

    pub fn request_error(
        code: impl Into<String>,
        description: Option<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            kind: ResultKind::RequestError,
            code: Some(code.into()),
            description,
            details,
        }
    }

    pub fn failed(description: Option<String>) -> Self {
        Self {
            kind: ResultKind::InternalError,
            code: None,
            description,
            details: None,
        }
    }

    pub fn exception(source: impl std::fmt::Display) -> Self {
        Self {
            kind: ResultKind::ExceptionOccurred,
            code: None,
            description: Some(source.to_string()),
            details: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.kind == ResultKind::Ok
    }
}

impl Default for ResponseResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl StableHash for ResponseResult {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.kind.stable_hash(),
            hash_opt(&self.code),
            hash_opt(&self.description),
            hash_opt(&self.details),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_success() {
        assert!(ResponseResult::default().is_ok());
    }

    #[test]
    fn request_error_carries_code_description_details() {
        let result = ResponseResult::request_error(
            "NotSupported",
            Some("action is not supported".to_string()),
            Some(serde_json::json!({ "action": "FlyToTheMoon" })),
        );
        assert_eq!(result.kind, ResultKind::RequestError);
        assert_eq!(result.code.as_deref(), Some("NotSupported"));
        assert!(!result.is_ok());
    }
}
