//! CancelReservation: the central system withdraws an existing reservation.

use codec::field::{parse_enum, parse_u32, required};
use codec::wire::{enum_value, put_opt, read_opt_nested, JsonWrite};
use codec::{CodecError, Ext, JsonObject};
use types::{combine, hash_opt, CancelReservationStatus, ReservationId, StableHash, StatusInfo};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelReservationRequest {
    pub reservation_id: ReservationId,
}

impl CancelReservationRequest {
    pub fn new(reservation_id: ReservationId) -> Self {
        Self { reservation_id }
    }
}

impl MessagePayload for CancelReservationRequest {
    const ACTION: &'static str = "CancelReservation";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/cancelReservationRequest";

    fn write_fields(&self, obj: &mut JsonObject, _ext: &Ext<'_>) {
        obj.insert("reservationId".to_string(), self.reservation_id.0.into());
    }

    fn read_fields(obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            reservation_id: ReservationId(required(
                obj,
                "reservationId",
                "the reservation to cancel",
                parse_u32,
            )?),
        })
    }

    fn stable_hash(&self) -> u64 {
        self.reservation_id.stable_hash()
    }
}

impl RequestPayload for CancelReservationRequest {}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelReservationResponse {
    pub status: CancelReservationStatus,
    pub status_info: Option<StatusInfo>,
}

impl CancelReservationResponse {
    pub fn accepted() -> Self {
        Self {
            status: CancelReservationStatus::Accepted,
            status_info: None,
        }
    }

    pub fn with_status_info(mut self, status_info: StatusInfo) -> Self {
        self.status_info = Some(status_info);
        self
    }
}

impl MessagePayload for CancelReservationResponse {
    const ACTION: &'static str = "CancelReservation";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/cancelReservationResponse";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("status".to_string(), enum_value(&self.status));
        put_opt(
            obj,
            "statusInfo",
            self.status_info.as_ref().map(|info| info.write_json(ext)),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: required(obj, "status", "the cancellation verdict", parse_enum)?,
            status_info: read_opt_nested(obj, "statusInfo", "detail on the verdict", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[self.status.stable_hash(), hash_opt(&self.status_info)])
    }
}

impl ResponsePayload for CancelReservationResponse {
    type Request = CancelReservationRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self {
            status: CancelReservationStatus::Rejected,
            status_info: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let response = CancelReservationResponse::accepted()
            .with_status_info(StatusInfo::new("NoReservation"));
        let ext = Ext::disabled(CancelReservationRequest::ACTION);
        let mut obj = JsonObject::new();
        response.write_fields(&mut obj, &ext);
        let parsed = CancelReservationResponse::read_fields(&obj, &ext).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn rejects_non_numeric_reservation_id() {
        let mut obj = JsonObject::new();
        obj.insert("reservationId".to_string(), "seven".into());
        let err = CancelReservationRequest::read_fields(&obj, &Ext::disabled(CancelReservationRequest::ACTION)).unwrap_err();
        assert!(err.to_string().contains("invalid"));
    }
}
