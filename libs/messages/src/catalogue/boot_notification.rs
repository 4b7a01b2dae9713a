//! BootNotification: a charging station announces itself after (re)boot

use codec::field::{parse_enum, parse_timestamp, parse_u32, required};
use codec::wire::{enum_value, put_opt, read_nested, read_opt_nested, timestamp_value, JsonWrite};
use codec::{CodecError, Ext, JsonObject};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use types::{combine, hash_opt, BootReason, ChargingStation, RegistrationStatus, StableHash, StatusInfo};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

/// Announce a (re)booted charging station to the central system.
#[derive(Debug, Clone, PartialEq)]
pub struct BootNotificationRequest {
    pub charging_station: ChargingStation,
    pub reason: BootReason,
}

impl BootNotificationRequest {
    pub fn new(charging_station: ChargingStation, reason: BootReason) -> Self {
        Self {
            charging_station,
            reason,
        }
    }
}

impl MessagePayload for BootNotificationRequest {
    const ACTION: &'static str = "BootNotification";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/bootNotificationRequest";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert(
            "chargingStation".to_string(),
            self.charging_station.write_json(ext),
        );
        obj.insert("reason".to_string(), enum_value(&self.reason));
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            charging_station: read_nested(
                obj,
                "chargingStation",
                "the charging station descriptor",
                ext,
            )?,
            reason: required(obj, "reason", "the boot reason", parse_enum)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[self.charging_station.stable_hash(), self.reason.stable_hash()])
    }
}

impl RequestPayload for BootNotificationRequest {}

/// The central system's registration verdict and heartbeat schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct BootNotificationResponse {
    pub status: RegistrationStatus,
    /// Central-system time, for clock alignment.
    pub current_time: DateTime<Utc>,
    /// Heartbeat interval the station must adopt.
    pub interval: Duration,
    pub status_info: Option<StatusInfo>,
}

impl BootNotificationResponse {
    pub fn new(status: RegistrationStatus, current_time: DateTime<Utc>, interval: Duration) -> Self {
        Self {
            status,
            current_time,
            interval,
            status_info: None,
        }
    }
}

impl MessagePayload for BootNotificationResponse {
    const ACTION: &'static str = "BootNotification";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/bootNotificationResponse";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("status".to_string(), enum_value(&self.status));
        obj.insert("currentTime".to_string(), timestamp_value(&self.current_time));
        obj.insert("interval".to_string(), Value::from(self.interval.as_secs()));
        put_opt(
            obj,
            "statusInfo",
            self.status_info.as_ref().map(|s| s.write_json(ext)),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: required(obj, "status", "the registration status", parse_enum)?,
            current_time: required(
                obj,
                "currentTime",
                "the central system time",
                parse_timestamp,
            )?,
            interval: Duration::from_secs(u64::from(required(
                obj,
                "interval",
                "the heartbeat interval",
                parse_u32,
            )?)),
            status_info: read_opt_nested(obj, "statusInfo", "the status detail", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.status.stable_hash(),
            self.current_time.stable_hash(),
            self.interval.stable_hash(),
            hash_opt(&self.status_info),
        ])
    }
}

impl ResponsePayload for BootNotificationResponse {
    type Request = BootNotificationRequest;

    /// A rejected registration with a zero interval: the station must not
    /// start heartbeating.
    fn rejected(_result: &ResponseResult) -> Self {
        Self::new(RegistrationStatus::Rejected, Utc::now(), Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_boot_has_zero_interval() {
        let response = BootNotificationResponse::rejected(&ResponseResult::failed(None));
        assert_eq!(response.status, RegistrationStatus::Rejected);
        assert_eq!(response.interval, Duration::ZERO);
        assert!(response.status_info.is_none());
    }
}
