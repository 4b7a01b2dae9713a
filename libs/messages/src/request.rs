//! Generic request wrapper
//!
//! Composes one [`RequestPayload`] with the metadata every request carries:
//! routing (destination, traversed path), correlation (request id, event
//! tracking id), timing (timestamp, timeout), signatures and custom data.
//!
//! A request is immutable once shared: all `with_*` builders consume the
//! value, and relaying produces a new request with an extended path. The
//! structural hash is computed exactly once, at construction, from the
//! already-validated field values.

use chrono::{DateTime, Utc};
use codec::wire::{read_opt_nested, read_opt_vec, write_vec, JsonWrite};
use codec::{CodecError, Ext, ExtensionRegistry, JsonObject};
use serde_json::Value;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tracing::debug;
use types::{
    combine, hash_opt, hash_set, multiset_eq, CustomData, Destination, EventTrackingId,
    NetworkPath, NodeId, RequestId, Signature, StableHash, DEFAULT_REQUEST_TIMEOUT,
};

use crate::payload::RequestPayload;

/// A typed request plus its delivery and correlation metadata.
#[derive(Debug, Clone)]
pub struct Request<P: RequestPayload> {
    destination: Destination,
    network_path: NetworkPath,
    request_id: RequestId,
    request_timestamp: DateTime<Utc>,
    request_timeout: Duration,
    event_tracking_id: EventTrackingId,
    signatures: Vec<Signature>,
    custom_data: Option<CustomData>,
    payload: P,
    /// Cached structural hash; never changes after construction.
    hash: u64,
}

impl<P: RequestPayload> Request<P> {
    /// Build a request with generated correlation ids, the current time and
    /// the default timeout.
    pub fn new(destination: Destination, payload: P) -> Self {
        Self {
            destination,
            network_path: NetworkPath::empty(),
            request_id: RequestId::generate(),
            request_timestamp: Utc::now(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            event_tracking_id: EventTrackingId::generate(),
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
            self.request_id.stable_hash(),
            hash_set(&self.signatures),
            hash_opt(&self.custom_data),
        ]);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self.rehashed()
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.request_timestamp = at;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_event_tracking_id(mut self, id: EventTrackingId) -> Self {
        self.event_tracking_id = id;
        self
    }

    /// Attach signatures; exact duplicates are dropped at construction, and
    /// the remaining collection compares as a multiset.
    pub fn with_signatures(mut self, signatures: Vec<Signature>) -> Self {
        self.signatures = dedup(signatures);
        self.rehashed()
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self.rehashed()
    }

    pub fn with_network_path(mut self, network_path: NetworkPath) -> Self {
        self.network_path = network_path;
        self
    }

    /// The copy a relaying node forwards: identical message, one more hop of
    /// provenance. The original request is untouched.
    #[must_use]
    pub fn relayed_via(&self, node: NodeId) -> Self {
        let mut next = self.clone();
        next.network_path = self.network_path.with_hop(node);
        next
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn network_path(&self) -> &NetworkPath {
        &self.network_path
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn request_timestamp(&self) -> DateTime<Utc> {
        self.request_timestamp
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn event_tracking_id(&self) -> &EventTrackingId {
        &self.event_tracking_id
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

    /// The structural hash computed at construction.
    pub fn stable_hash(&self) -> u64 {
        self.hash
    }

    /// Serialize the message body: payload fields plus signatures and custom
    /// data. Routing and correlation metadata travel out-of-band.
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

    /// Like [`to_json`](Self::to_json), with the JSON-LD `@context` key
    /// identifying the message type. Never required for parsing.
    pub fn to_json_with_context(&self, registry: &ExtensionRegistry) -> Value {
        let mut value = self.to_json(registry);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("@context".to_string(), Value::String(P::CONTEXT.to_string()));
        }
        value
    }

    /// Parse a wire document into a request.
    ///
    /// Correlation and routing metadata (`request_id`, `destination`,
    /// `network_path`) are supplied by the transport alongside the body.
    /// Malformed input is an `Err` value; this never panics.
    pub fn try_parse(
        document: &Value,
        request_id: RequestId,
        destination: Destination,
        network_path: NetworkPath,
        registry: &ExtensionRegistry,
    ) -> Result<Self, CodecError> {
        let ext = Ext::new(registry, P::ACTION);
        let obj = codec::wire::expect_object(document)?;
        let parsed = Self::read_body(obj, &ext).map_err(|e| {
            debug!(action = P::ACTION, %request_id, error = %e, "rejecting malformed request document");
            e
        })?;
        Ok(Self {
            destination,
            network_path,
            request_id,
            request_timestamp: Utc::now(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            event_tracking_id: EventTrackingId::generate(),
            signatures: parsed.1,
            custom_data: parsed.2,
            payload: parsed.0,
            hash: 0,
        }
        .rehashed())
    }

    fn read_body(
        obj: &JsonObject,
        ext: &Ext<'_>,
    ) -> Result<(P, Vec<Signature>, Option<CustomData>), CodecError> {
        let payload = P::read_fields(obj, ext)?;
        let signatures = dedup(read_opt_vec(obj, "signatures", "the message signatures", ext)?);
        let custom_data = read_opt_nested(obj, "customData", "the custom data block", ext)?;
        Ok((payload, signatures, custom_data))
    }
}

fn dedup(signatures: Vec<Signature>) -> Vec<Signature> {
    let mut out: Vec<Signature> = Vec::with_capacity(signatures.len());
    for signature in signatures {
        if !out.contains(&signature) {
            out.push(signature);
        }
    }
    out
}

impl<P: RequestPayload> PartialEq for Request<P> {
    fn eq(&self, other: &Self) -> bool {
        self.request_id == other.request_id
            && self.payload == other.payload
            && multiset_eq(&self.signatures, &other.signatures)
            && self.custom_data == other.custom_data
    }
}

impl<P: RequestPayload> Hash for Request<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<P: RequestPayload> StableHash for Request<P> {
    fn stable_hash(&self) -> u64 {
        self.hash
    }
}
