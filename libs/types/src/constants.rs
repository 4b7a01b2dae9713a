//! Protocol-wide constants
//!
//! Centralizes the handful of values every crate in the workspace agrees on,
//! so they are defined exactly once.

use std::time::Duration;

/// Protocol version advertised by this message layer.
pub const PROTOCOL_VERSION: &str = "2.1";

/// Base URI for per-message JSON-LD context identifiers.
///
/// Each concrete message appends its own lower-camel-case segment, e.g.
/// `{CONTEXT_BASE}/authorizeRequest`.
pub const CONTEXT_BASE: &str = "https://voltwire.io/context/ocpp/v2.1";

/// Default timeout applied to a request when the sender does not supply one.
///
/// Independent of any transport-level timeout; the transport layer enforces
/// this per request when waiting for the matching response.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Well-known node identifier of the central system.
pub const CSMS_NODE_ID: &str = "CSMS";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs(30));
    }
}
