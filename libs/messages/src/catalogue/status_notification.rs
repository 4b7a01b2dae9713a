//! StatusNotification: a charging station reports a connector status change.

use chrono::{DateTime, Utc};
use codec::field::{parse_enum, parse_timestamp, parse_u32, required};
use codec::wire::{enum_value, timestamp_value};
use codec::{CodecError, Ext, JsonObject};
use types::{combine, ConnectorId, ConnectorStatus, EvseId, StableHash};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

/// Report the status of one connector at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusNotificationRequest {
    /// When the status change was observed, not when it was sent.
    pub timestamp: DateTime<Utc>,
    pub connector_status: ConnectorStatus,
    pub evse_id: EvseId,
    pub connector_id: ConnectorId,
}

impl StatusNotificationRequest {
    pub fn new(
        timestamp: DateTime<Utc>,
        connector_status: ConnectorStatus,
        evse_id: EvseId,
        connector_id: ConnectorId,
    ) -> Self {
        Self {
            timestamp,
            connector_status,
            evse_id,
            connector_id,
        }
    }
}

impl MessagePayload for StatusNotificationRequest {
    const ACTION: &'static str = "StatusNotification";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/statusNotificationRequest";

    fn write_fields(&self, obj: &mut JsonObject, _ext: &Ext<'_>) {
        obj.insert("timestamp".to_string(), timestamp_value(&self.timestamp));
        obj.insert(
            "connectorStatus".to_string(),
            enum_value(&self.connector_status),
        );
        obj.insert("evseId".to_string(), self.evse_id.0.into());
        obj.insert("connectorId".to_string(), self.connector_id.0.into());
    }

    fn read_fields(obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            timestamp: required(
                obj,
                "timestamp",
                "when the status was observed",
                parse_timestamp,
            )?,
            connector_status: required(
                obj,
                "connectorStatus",
                "the reported connector status",
                parse_enum,
            )?,
            evse_id: EvseId(required(obj, "evseId", "the EVSE of the connector", parse_u32)?),
            connector_id: ConnectorId(required(
                obj,
                "connectorId",
                "the connector within the EVSE",
                parse_u32,
            )?),
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.timestamp.stable_hash(),
            self.connector_status.stable_hash(),
            self.evse_id.stable_hash(),
            self.connector_id.stable_hash(),
        ])
    }
}

impl RequestPayload for StatusNotificationRequest {}

/// Acknowledgement; the protocol defines no response fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusNotificationResponse;

impl MessagePayload for StatusNotificationResponse {
    const ACTION: &'static str = "StatusNotification";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/statusNotificationResponse";

    fn write_fields(&self, _obj: &mut JsonObject, _ext: &Ext<'_>) {}

    fn read_fields(_obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self)
    }

    fn stable_hash(&self) -> u64 {
        0x5354_4154_5553_4e4f
    }
}

impl ResponsePayload for StatusNotificationResponse {
    type Request = StatusNotificationRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn round_trips_through_json() {
        let request = StatusNotificationRequest::new(
            Utc.with_ymd_and_hms(2026, 5, 2, 16, 4, 11).single().unwrap(),
            ConnectorStatus::Occupied,
            EvseId(1),
            ConnectorId(2),
        );
        let ext = Ext::disabled(StatusNotificationRequest::ACTION);
        let mut obj = JsonObject::new();
        request.write_fields(&mut obj, &ext);
        assert_eq!(obj["connectorStatus"], "Occupied");
        let parsed = StatusNotificationRequest::read_fields(&obj, &ext).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn every_field_is_mandatory() {
        let request = StatusNotificationRequest::new(
            Utc::now(),
            ConnectorStatus::Available,
            EvseId(1),
            ConnectorId(1),
        );
        let ext = Ext::disabled(StatusNotificationRequest::ACTION);
        let mut full = JsonObject::new();
        request.write_fields(&mut full, &ext);
        for key in ["timestamp", "connectorStatus", "evseId", "connectorId"] {
            let mut partial = full.clone();
            partial.remove(key);
            let err = StatusNotificationRequest::read_fields(&partial, &ext).unwrap_err();
            assert!(err.to_string().contains(key), "missing {key} not reported");
        }
    }
}
