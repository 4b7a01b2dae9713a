//! Heartbeat: periodic liveness probe with clock alignment

use chrono::{DateTime, Utc};
use codec::field::{parse_timestamp, required};
use codec::wire::timestamp_value;
use codec::{CodecError, Ext, JsonObject};
use types::StableHash;

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

/// An empty body: the request's existence is the probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeartbeatRequest;

impl MessagePayload for HeartbeatRequest {
    const ACTION: &'static str = "Heartbeat";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/heartbeatRequest";

    fn write_fields(&self, _obj: &mut JsonObject, _ext: &Ext<'_>) {}

    fn read_fields(_obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self)
    }

    fn stable_hash(&self) -> u64 {
        // A fixed tag: every heartbeat body is identical.
        0x4845_4152_5442_4541
    }
}

impl RequestPayload for HeartbeatRequest {}

/// The central system's current time.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatResponse {
    pub current_time: DateTime<Utc>,
}

impl HeartbeatResponse {
    pub fn new(current_time: DateTime<Utc>) -> Self {
        Self { current_time }
    }
}

impl MessagePayload for HeartbeatResponse {
    const ACTION: &'static str = "Heartbeat";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/heartbeatResponse";

    fn write_fields(&self, obj: &mut JsonObject, _ext: &Ext<'_>) {
        obj.insert("currentTime".to_string(), timestamp_value(&self.current_time));
    }

    fn read_fields(obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            current_time: required(
                obj,
                "currentTime",
                "the central system time",
                parse_timestamp,
            )?,
        })
    }

    fn stable_hash(&self) -> u64 {
        self.current_time.stable_hash()
    }
}

impl ResponsePayload for HeartbeatResponse {
    type Request = HeartbeatRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self::new(Utc::now())
    }
}
