//! Payload traits: the per-message field lists
//!
//! A concrete message type is nothing but a payload struct plus a field
//! list: how to write its fields into a wire object, how to read them back
//! under the field contract, and how to fold them into the structural hash.
//! The generic [`Request`](crate::Request) and [`Response`](crate::Response)
//! wrappers supply everything else (routing metadata, signatures, custom
//! data, correlation, error responses), so adding a message type adds no new
//! framework code.

use crate::result::ResponseResult;
use codec::{CodecError, Ext, JsonObject};

/// Field list of one message body.
pub trait MessagePayload: Clone + std::fmt::Debug + PartialEq {
    /// Protocol action name, e.g. `Authorize`; also the extension-hook key.
    const ACTION: &'static str;

    /// JSON-LD context URI identifying this message type.
    const CONTEXT: &'static str;

    /// Write the message-specific fields into `obj`, omitting absent
    /// optionals entirely.
    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>);

    /// Read the message-specific fields under the field contract.
    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError>;

    /// Structural hash over the message-specific fields.
    fn stable_hash(&self) -> u64;
}

/// Marker for payloads that travel as requests.
pub trait RequestPayload: MessagePayload {}

/// Payloads that travel as responses to a specific request type.
pub trait ResponsePayload: MessagePayload {
    /// The request type this payload answers.
    type Request: RequestPayload;

    /// The message-specific deny values used when a response is synthesized
    /// by the error factory instead of business logic: "rejected" statuses,
    /// error-valued token info, empty collections.
    ///
    /// `result` carries the failure kind so payloads can differentiate, e.g.
    /// a parsing-error verdict versus a signature-error verdict.
    fn rejected(result: &ResponseResult) -> Self;
}
