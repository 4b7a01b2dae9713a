//! # Voltwire Message Framework
//!
//! Typed request/response pairs for charge-point-to-central-system
//! communication across a multi-hop overlay of networking nodes.
//!
//! The framework is three small generic pieces plus a catalogue:
//!
//! - [`Request<P>`] / [`Response<P>`]: the metadata every message carries
//!   (routing, correlation, timing, signatures, custom data) wrapped around
//!   a message-specific payload
//! - [`payload`]: the traits a payload implements; a concrete message type
//!   is only a field list, never new framework code
//! - [`result`]: the response-outcome taxonomy, and the error-factory
//!   constructors on [`Response`] that turn every class of failure into a
//!   well-formed response object
//! - [`catalogue`]: the concrete message types
//!
//! ## Lifecycle
//!
//! constructed → (optionally) signed → serialized → transmitted → parsed by
//! the peer → answered by business logic or by the error factory →
//! serialized → transmitted back → parsed by the sender → matched to the
//! pending request by request id.
//!
//! Every value in this crate is immutable after construction and safe to
//! share across tasks; parsing and serialization are pure and perform no
//! I/O. The transport layer (out of scope here) owns request-id
//! registration, per-request timeouts and response matching.

pub mod catalogue;
pub mod payload;
pub mod request;
pub mod response;
pub mod result;

// Re-export commonly used types
pub use catalogue::{
    AuthorizeRequest, AuthorizeResponse, BootNotificationRequest, BootNotificationResponse,
    CancelReservationRequest, CancelReservationResponse, HeartbeatRequest, HeartbeatResponse,
    MeterValuesRequest, MeterValuesResponse, RequestStartTransactionRequest,
    RequestStartTransactionResponse, RequestStopTransactionRequest,
    RequestStopTransactionResponse, StatusNotificationRequest, StatusNotificationResponse,
};
pub use payload::{MessagePayload, RequestPayload, ResponsePayload};
pub use request::Request;
pub use response::Response;
pub use result::{ResponseResult, ResultKind};
