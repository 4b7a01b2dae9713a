//! Cryptographic signature records
//!
//! Signatures are carried as opaque validated payloads: this layer stores
//! and compares them but never verifies key material itself. Collections of
//! signatures compare as multisets, because the order in which a message was
//! signed carries no protocol meaning.

use crate::hashing::{combine, hash_opt, StableHash};
use serde::{Deserialize, Serialize};

/// Outcome of signature verification, attached by the policy layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureStatus {
    Valid,
    Invalid,
    /// No verification policy matched the key.
    Unverified,
}

impl StableHash for SignatureStatus {
    fn stable_hash(&self) -> u64 {
        match self {
            Self::Valid => 1,
            Self::Invalid => 2,
            Self::Unverified => 3,
        }
    }
}

/// One cryptographic signature over the signable portion of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Identifier of the signing key.
    pub key_id: String,
    /// The signature bytes, in the declared encoding.
    pub value: String,
    /// Signing algorithm; `secp256r1` unless stated otherwise.
    pub algorithm: String,
    /// How the signable data was derived from the message.
    pub signing_method: String,
    /// How `value` is encoded, e.g. `base64`.
    pub encoding_method: String,
    /// Verification outcome; local metadata, never serialized to the wire.
    #[serde(skip)]
    pub status: Option<SignatureStatus>,
}

impl Signature {
    pub const DEFAULT_ALGORITHM: &'static str = "secp256r1";
    pub const DEFAULT_SIGNING_METHOD: &'static str = "json";
    pub const DEFAULT_ENCODING_METHOD: &'static str = "base64";

    /// A signature with the default algorithm, signing and encoding methods.
    pub fn new(key_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            value: value.into(),
            algorithm: Self::DEFAULT_ALGORITHM.to_string(),
            signing_method: Self::DEFAULT_SIGNING_METHOD.to_string(),
            encoding_method: Self::DEFAULT_ENCODING_METHOD.to_string(),
            status: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_status(mut self, status: SignatureStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl StableHash for Signature {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.key_id.stable_hash(),
            self.value.stable_hash(),
            self.algorithm.stable_hash(),
            self.signing_method.stable_hash(),
            self.encoding_method.stable_hash(),
            hash_opt(&self.status),
        ])
    }
}
