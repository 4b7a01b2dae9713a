//! Identifier newtypes for message correlation and routing
//!
//! Three distinct identifier spaces, kept as separate types on purpose:
//!
//! - [`NodeId`] addresses a networking node in the overlay
//! - [`RequestId`] pairs exactly one request with exactly one response
//! - [`EventTrackingId`] correlates multiple related exchanges end to end,
//!   independently of any single request/response pair

use crate::constants::CSMS_NODE_ID;
use crate::hashing::StableHash;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of one networking node in the overlay.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Well-known identifier of the central system.
    pub fn csms() -> Self {
        Self(CSMS_NODE_ID.to_string())
    }

    /// Placeholder for a directly connected peer that carries no overlay
    /// identifier of its own.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl StableHash for NodeId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Process-wide monotonic counter, seeded from the wall clock so that ids
/// from a restarted process do not collide with recently issued ones.
static NEXT_REQUEST_ID: Lazy<AtomicU64> = Lazy::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    AtomicU64::new(seed)
});

static EVENT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Correlation key pairing one request with exactly one response.
///
/// Supplied by the transport layer when one exists on the wire, generated
/// locally otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Generate a fresh id from the process-wide counter.
    pub fn generate() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StableHash for RequestId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Correlation key spanning multiple related request/response exchanges.
///
/// Independent of [`RequestId`]: a single tracked event (say, one charging
/// session being authorized, started and metered) threads the same tracking
/// id through many requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTrackingId(String);

impl EventTrackingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh tracking id from the clock and a process counter.
    pub fn generate() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let count = EVENT_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&now.to_be_bytes());
        bytes[8..].copy_from_slice(&(count as u32).to_be_bytes());
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StableHash for EventTrackingId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_request_ids_are_distinct() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_tracking_ids_are_distinct_and_hex() {
        let a = EventTrackingId::generate();
        let b = EventTrackingId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 24);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn csms_node_id_is_well_known() {
        assert_eq!(NodeId::csms().as_str(), "CSMS");
    }
}
