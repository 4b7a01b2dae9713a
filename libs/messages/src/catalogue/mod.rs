//! Concrete message catalogue
//!
//! Each message type is a static application of the core contract: a
//! payload struct, its field list, and its deny values for error responses.
//! Nothing in here adds framework logic; a new message type is a new file of
//! the same shape.

mod authorize;
mod boot_notification;
mod cancel_reservation;
mod heartbeat;
mod meter_values;
mod status_notification;
mod transaction;

pub use authorize::{AuthorizeRequest, AuthorizeResponse};
pub use boot_notification::{BootNotificationRequest, BootNotificationResponse};
pub use cancel_reservation::{CancelReservationRequest, CancelReservationResponse};
pub use heartbeat::{HeartbeatRequest, HeartbeatResponse};
pub use meter_values::{MeterValuesRequest, MeterValuesResponse};
pub use status_notification::{StatusNotificationRequest, StatusNotificationResponse};
pub use transaction::{
    RequestStartTransactionRequest, RequestStartTransactionResponse,
    RequestStopTransactionRequest, RequestStopTransactionResponse,
};
