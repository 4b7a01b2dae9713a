//! # Voltwire Wire Codec
//!
//! The "rules" layer of the Voltwire message stack: everything that turns an
//! untyped JSON wire document into validated values from `types`, and back.
//!
//! - [`field`]: the field-contract engine. Every concrete message parser is
//!   a flat list of `required`/`optional` extractions; adding a message type
//!   adds a field list, never new extraction logic.
//! - [`extensions`]: the per-(message, nested-object) hook registry that lets
//!   vendor code rewrite or annotate a structural result after core parsing
//!   or before serialization, without touching the base schema.
//! - [`wire`]: the [`JsonRead`]/[`JsonWrite`] implementations for every
//!   nested protocol object.
//! - [`error`]: [`CodecError`], the total error surface of this crate. Parse
//!   entry points return errors as values; nothing here panics on malformed
//!   input.
//!
//! ## What This Crate Does NOT Contain
//!
//! - Transport or socket handling
//! - The request/response framework (lives in `messages`)
//! - Signature verification (signatures are opaque validated payloads)

pub mod error;
pub mod extensions;
pub mod field;
pub mod wire;

// Re-export commonly used types
pub use error::CodecError;
pub use extensions::{Ext, ExtensionRegistry};
pub use field::JsonObject;
pub use wire::{JsonRead, JsonWrite};
