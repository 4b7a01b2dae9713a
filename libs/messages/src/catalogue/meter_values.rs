//! MeterValues: a charging station reports sampled meter readings
//!
//! Sample order is meaningful: readings form a timeline, so both equality
//! and hashing of the request are order-sensitive.

use codec::field::{parse_u32, required};
use codec::wire::{read_vec, write_vec};
use codec::{CodecError, Ext, JsonObject};
use types::{combine, hash_seq, EvseId, MeterValue, StableHash};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

/// Deliver one or more meter readings for an EVSE.
///
/// EVSE id `0` carries readings for the station as a whole rather than a
/// specific EVSE.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterValuesRequest {
    pub evse_id: EvseId,
    pub meter_values: Vec<MeterValue>,
}

impl MeterValuesRequest {
    pub fn new(evse_id: EvseId, meter_values: Vec<MeterValue>) -> Self {
        Self {
            evse_id,
            meter_values,
        }
    }
}

impl MessagePayload for MeterValuesRequest {
    const ACTION: &'static str = "MeterValues";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/meterValuesRequest";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("evseId".to_string(), self.evse_id.0.into());
        obj.insert("meterValue".to_string(), write_vec(&self.meter_values, ext));
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            evse_id: EvseId(required(
                obj,
                "evseId",
                "the EVSE the readings belong to",
                parse_u32,
            )?),
            meter_values: read_vec(obj, "meterValue", "the sampled meter readings", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[self.evse_id.stable_hash(), hash_seq(&self.meter_values)])
    }
}

impl RequestPayload for MeterValuesRequest {}

/// Acknowledgement; the protocol defines no response fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeterValuesResponse;

impl MessagePayload for MeterValuesResponse {
    const ACTION: &'static str = "MeterValues";
    const CONTEXT: &'static str = "https://voltwire.io/context/ocpp/v2.1/meterValuesResponse";

    fn write_fields(&self, _obj: &mut JsonObject, _ext: &Ext<'_>) {}

    fn read_fields(_obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self)
    }

    fn stable_hash(&self) -> u64 {
        0x4d45_5445_5256_414c
    }
}

impl ResponsePayload for MeterValuesResponse {
    type Request = MeterValuesRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self
    }
}
