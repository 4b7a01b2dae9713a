//! Generic response wrapper and the error-response factory
//!
//! A response always holds a read-only reference to the request that caused
//! it (never the other way around, so no reference cycle) and answers to the
//! same request id. Besides the success path, this module is the single
//! boundary that turns every class of failure into a well-formed,
//! protocol-legal response object: a peer that sent a malformed or unsigned
//! request still receives a schema-conformant response, never a dropped
//! connection or a raw fault.

use chrono::{DateTime, Utc};
use codec::wire::{read_opt_nested, read_opt_vec, write_vec, JsonWrite};
use codec::{CodecError, Ext, ExtensionRegistry, JsonObject};
use serde_json::Value;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::warn;
use types::{
    combine, hash_opt, hash_set, multiset_eq, reply_destination, CustomData, Destination,
    NetworkPath, NodeId, RequestId, Signature, StableHash,
};

use crate::payload::ResponsePayload;
use crate::request::Request;
use crate::result::ResponseResult;

/// A typed response, correlated to its originating request.
#[derive(Debug, Clone)]
pub struct Response<P: ResponsePayload> {
    /// The request this response answers. Read-only back-reference; the
    /// request never references the response.
    request: Arc<Request<P::Request>>,
    result: ResponseResult,
    response_timestamp: DateTime<Utc>,
    destination: Destination,
    network_path: NetworkPath,
    signatures: Vec<Signature>,
    custom_data: Option<CustomData>,
    payload: P,
    /// Cached structural hash; never changes after construction.
    hash: u64,
}

impl<P: ResponsePayload> Response<P> {
    /// A successful response.
    ///
    /// The destination defaults to the reverse of the path the request
    /// actually traversed; a request that arrived over a direct connection
    /// (empty path) is answered to the anonymous direct peer.
    pub fn new(request: Arc<Request<P::Request>>, payload: P) -> Self {
        Self::build(request, payload, ResponseResult::ok())
    }

    fn build(request: Arc<Request<P::Request>>, payload: P, result: ResponseResult) -> Self {
        let destination = reply_destination(request.network_path())
            .unwrap_or_else(|_| Destination::Node(NodeId::zero()));
        Self {
            request,
            result,
            response_timestamp: Utc::now(),
            destination,
            network_path: NetworkPath::empty(),
            signatures: Vec::new(),
            custom_data: None,
            payload,
            hash: 0,
        }
        .rehashed()
    }

    fn rehashed(mut self) -> Self {
        self.hash = combine(&[
            self.payload.stable_hash(),
            self.request.request_id().stable_hash(),
            self.result.stable_hash(),
            hash_set(&self.signatures),
            hash_opt(&self.custom_data),
        ]);
        self
    }

    // --- error-response factory -------------------------------------------
    //
    // Every constructor below is total: it never panics, never mutates the
    // originating request, and always yields a response whose request id
    // matches the request's, so correlation holds even for failures.

    /// The field contract rejected the wire document.
    pub fn formation_violation(
        request: Arc<Request<P::Request>>,
        description: impl Into<String>,
    ) -> Self {
        let result = ResponseResult::formation_violation(description);
        let payload = P::rejected(&result);
        Self::build(request, payload, result)
    }

    /// Signatures were present but failed verification.
    pub fn signature_error(
        request: Arc<Request<P::Request>>,
        description: impl Into<String>,
    ) -> Self {
        let result = ResponseResult::signature_error(description);
        let payload = P::rejected(&result);
        Self::build(request, payload, result)
    }

    /// A transport- or protocol-level rejection of a well-formed request.
    pub fn request_error(
        request: Arc<Request<P::Request>>,
        code: impl Into<String>,
        description: Option<String>,
        details: Option<Value>,
    ) -> Self {
        let result = ResponseResult::request_error(code, description, details);
        let payload = P::rejected(&result);
        Self::build(request, payload, result)
    }

    /// Generic server-side failure.
    pub fn failed(request: Arc<Request<P::Request>>, description: Option<String>) -> Self {
        let result = ResponseResult::failed(description);
        let payload = P::rejected(&result);
        Self::build(request, payload, result)
    }

    /// Convert an unexpected fault into a response.
    ///
    /// This is the only boundary that may observe a fault from response
    /// construction or business logic, and it must not itself fail.
    pub fn exception_occurred(
        request: Arc<Request<P::Request>>,
        source: impl std::fmt::Display,
    ) -> Self {
        let result = ResponseResult::exception(&source);
        warn!(
            action = P::ACTION,
            request_id = %request.request_id(),
            fault = %source,
            "converting unexpected fault into an error response"
        );
        let payload = P::rejected(&result);
        Self::build(request, payload, result)
    }

    // ----------------------------------------------------------------------

    pub fn with_signatures(mut self, signatures: Vec<Signature>) -> Self {
        let mut deduped: Vec<Signature> = Vec::with_capacity(signatures.len());
        for signature in signatures {
            if !deduped.contains(&signature) {
                deduped.push(signature);
            }
        }
        self.signatures = deduped;
        self.rehashed()
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self.rehashed()
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.response_timestamp = at;
        self
    }

    pub fn with_network_path(mut self, network_path: NetworkPath) -> Self {
        self.network_path = network_path;
        self
    }

    /// The originating request.
    pub fn request(&self) -> &Arc<Request<P::Request>> {
        &self.request
    }

    /// The sole correlation key a transport needs: always equal to the
    /// originating request's id.
    pub fn request_id(&self) -> RequestId {
        self.request.request_id()
    }

    pub fn result(&self) -> &ResponseResult {
        &self.result
    }

    pub fn response_timestamp(&self) -> DateTime<Utc> {
        self.response_timestamp
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn network_path(&self) -> &NetworkPath {
        &self.network_path
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn stable_hash(&self) -> u64 {
        self.hash
    }

    /// Serialize the response body; same conventions as the request side.
    pub fn to_json(&self, registry: &ExtensionRegistry) -> Value {
        let ext = Ext::new(registry, P::ACTION);
        let mut obj = JsonObject::new();
        self.payload.write_fields(&mut obj, &ext);
        if !self.signatures.is_empty() {
            obj.insert("signatures".to_string(), write_vec(&self.signatures, &ext));
        }
        if let Some(custom_data) = &self.custom_data {
            obj.insert("customData".to_string(), custom_data.write_json(&ext));
        }
        Value::Object(obj)
    }

    /// Like [`to_json`](Self::to_json), with the JSON-LD `@context` key.
    pub fn to_json_with_context(&self, registry: &ExtensionRegistry) -> Value {
        let mut value = self.to_json(registry);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("@context".to_string(), Value::String(P::CONTEXT.to_string()));
        }
        value
    }

    /// Parse a wire document into the response for `request`.
    ///
    /// The originating request is supplied by the transport's pending-request
    /// table (matched by request id), which is what makes the back-reference
    /// and the correlation invariant hold by construction.
    pub fn try_parse(
        request: Arc<Request<P::Request>>,
        document: &Value,
        network_path: NetworkPath,
        registry: &ExtensionRegistry,
    ) -> Result<Self, CodecError> {
        let ext = Ext::new(registry, P::ACTION);
        let obj = codec::wire::expect_object(document)?;
        let payload = P::read_fields(obj, &ext)?;
        let signatures = read_opt_vec(obj, "signatures", "the message signatures", &ext)?;
        let custom_data = read_opt_nested(obj, "customData", "the custom data block", &ext)?;
        Ok(Self::build(request, payload, ResponseResult::ok())
            .with_network_path(network_path)
            .with_signatures(signatures)
            .with_custom_data_opt(custom_data))
    }

    fn with_custom_data_opt(mut self, custom_data: Option<CustomData>) -> Self {
        self.custom_data = custom_data;
        self.rehashed()
    }
}

impl<P: ResponsePayload> PartialEq for Response<P> {
    fn eq(&self, other: &Self) -> bool {
        self.request_id() == other.request_id()
            && self.payload == other.payload
            && self.result == other.result
            && multiset_eq(&self.signatures, &other.signatures)
            && self.custom_data == other.custom_data
    }
}

impl<P: ResponsePayload> Hash for Response<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<P: ResponsePayload> StableHash for Response<P> {
    fn stable_hash(&self) -> u64 {
        self.hash
    }
}
