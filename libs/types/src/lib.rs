//! # Voltwire Type System
//!
//! Pure value types shared by every layer of the Voltwire message stack:
//!
//! - **Identifiers**: networking-node ids, request/response correlation ids,
//!   end-to-end event-tracking ids
//! - **Routing envelope**: the intended [`Destination`] of a message and the
//!   [`NetworkPath`] it actually traversed through intermediate nodes
//! - **Charging domain payloads**: id tokens, meter values, charging-station
//!   descriptors and their status vocabularies
//! - **Structural hashing**: the [`StableHash`] trait and combinators used to
//!   precompute a message hash once, at construction time
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → libs/messages
//!     ↑             ↓              ↓
//! Pure Data    Wire Rules     Request/Response
//! Structures   Field Contracts  Framework
//! ```
//!
//! This crate contains no JSON logic and no I/O. Everything here is an
//! immutable value object: equality is structural, hashing is deterministic,
//! and nothing is mutated after construction, which is what makes the whole
//! message layer safe to share across tasks without locking.

pub mod constants;
pub mod custom_data;
pub mod hashing;
pub mod identifiers;
pub mod idtoken;
pub mod metering;
pub mod routing;
pub mod signature;
pub mod station;

// Re-export commonly used types
pub use constants::{CONTEXT_BASE, CSMS_NODE_ID, DEFAULT_REQUEST_TIMEOUT, PROTOCOL_VERSION};
pub use custom_data::CustomData;
pub use hashing::{combine, hash_json, hash_opt, hash_seq, hash_set, multiset_eq, StableHash};
pub use identifiers::{EventTrackingId, NodeId, RequestId};
pub use idtoken::{AdditionalInfo, AuthorizationStatus, IdToken, IdTokenInfo, IdTokenType};
pub use metering::{
    Measurand, MeasurandLocation, MeterValue, Phase, ReadingContext, SampledValue, UnitOfMeasure,
};
pub use routing::{reply_destination, Destination, NetworkPath, RoutingError, SourceRoute};
pub use signature::{Signature, SignatureStatus};
pub use station::{
    BootReason, CancelReservationStatus, ChargingStation, ConnectorId, ConnectorStatus, EvseId,
    Modem, RegistrationStatus, RemoteStartId, RequestStartStopStatus, ReservationId, StatusInfo,
    TransactionId,
};
