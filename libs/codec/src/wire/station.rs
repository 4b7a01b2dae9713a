//! Wire codec for charging-station descriptors and status details

use super::{
    expect_object, optional, parse_string, put_opt, read_opt_nested, required, JsonRead, JsonWrite,
};
use crate::error::CodecError;
use crate::extensions::Ext;
use crate::field::JsonObject;
use serde_json::Value;
use types::{ChargingStation, Modem, StatusInfo};

impl JsonRead for Modem {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let modem = Modem {
            iccid: optional(obj, "iccid", "the modem ICCID", parse_string)?,
            imsi: optional(obj, "imsi", "the modem IMSI", parse_string)?,
        };
        Ok(ext.after_parse("modem", obj, modem))
    }
}

impl JsonWrite for Modem {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        put_opt(&mut obj, "iccid", self.iccid.clone().map(Value::String));
        put_opt(&mut obj, "imsi", self.imsi.clone().map(Value::String));
        Value::Object(ext.before_serialize("modem", obj))
    }
}

impl JsonRead for ChargingStation {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let station = ChargingStation {
            model: required(obj, "model", "the charging station model", parse_string)?,
            vendor_name: required(obj, "vendorName", "the charging station vendor", parse_string)?,
            serial_number: optional(obj, "serialNumber", "the serial number", parse_string)?,
            firmware_version: optional(
                obj,
                "firmwareVersion",
                "the firmware version",
                parse_string,
            )?,
            modem: read_opt_nested(obj, "modem", "the modem descriptor", ext)?,
        };
        Ok(ext.after_parse("chargingStation", obj, station))
    }
}

impl JsonWrite for ChargingStation {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("model".to_string(), Value::String(self.model.clone()));
        obj.insert(
            "vendorName".to_string(),
            Value::String(self.vendor_name.clone()),
        );
        put_opt(
            &mut obj,
            "serialNumber",
            self.serial_number.clone().map(Value::String),
        );
        put_opt(
            &mut obj,
            "firmwareVersion",
            self.firmware_version.clone().map(Value::String),
        );
        put_opt(&mut obj, "modem", self.modem.as_ref().map(|m| m.write_json(ext)));
        Value::Object(ext.before_serialize("chargingStation", obj))
    }
}

impl JsonRead for StatusInfo {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let info = StatusInfo {
            reason_code: required(obj, "reasonCode", "the status reason code", parse_string)?,
            additional_info: optional(
                obj,
                "additionalInfo",
                "the additional status detail",
                parse_string,
            )?,
        };
        Ok(ext.after_parse("statusInfo", obj, info))
    }
}

impl JsonWrite for StatusInfo {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert(
            "reasonCode".to_string(),
            Value::String(self.reason_code.clone()),
        );
        put_opt(
            &mut obj,
            "additionalInfo",
            self.additional_info.clone().map(Value::String),
        );
        Value::Object(ext.before_serialize("statusInfo", obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn charging_station_round_trip() {
        let ext = Ext::disabled("BootNotification");
        let station = ChargingStation::new("Wallbox-22", "Voltwire")
            .with_serial_number("SN-001")
            .with_firmware_version("1.4.2");
        let wire = station.write_json(&ext);
        assert_eq!(wire["model"], json!("Wallbox-22"));
        assert!(wire.get("modem").is_none());
        assert_eq!(ChargingStation::read_json(&wire, &ext).unwrap(), station);
    }

    #[test]
    fn vendor_name_is_mandatory() {
        let ext = Ext::disabled("BootNotification");
        let err = ChargingStation::read_json(&json!({ "model": "Wallbox-22" }), &ext).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required property 'vendorName': the charging station vendor"
        );
    }
}
