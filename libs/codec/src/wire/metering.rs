//! Wire codec for meter values
//!
//! Sample order is meaning-bearing: both read and write preserve the order
//! (and duplicates) of `meterValue` and `sampledValue` arrays exactly.

use super::{
    enum_value, expect_object, optional, parse_enum, parse_f64, parse_string, parse_timestamp,
    put_opt, read_opt_nested, required, timestamp_value, write_vec, JsonRead, JsonWrite,
};
use crate::error::CodecError;
use crate::extensions::Ext;
use crate::field::{self, JsonObject};
use serde_json::Value;
use types::{Measurand, MeterValue, ReadingContext, SampledValue, UnitOfMeasure};

impl JsonRead for UnitOfMeasure {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let unit = UnitOfMeasure {
            unit: required(obj, "unit", "the unit symbol", parse_string)?,
            multiplier: optional(obj, "multiplier", "the decimal multiplier", field::parse_i32)?
                .unwrap_or(0),
        };
        Ok(ext.after_parse("unitOfMeasure", obj, unit))
    }
}

impl JsonWrite for UnitOfMeasure {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("unit".to_string(), Value::String(self.unit.clone()));
        if self.multiplier != 0 {
            obj.insert("multiplier".to_string(), Value::from(self.multiplier));
        }
        Value::Object(ext.before_serialize("unitOfMeasure", obj))
    }
}

impl JsonRead for SampledValue {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let sample = SampledValue {
            value: required(obj, "value", "the measured value", parse_f64)?,
            context: optional(obj, "context", "the reading context", parse_enum)?
                .unwrap_or_default(),
            measurand: optional(obj, "measurand", "the measurand", parse_enum)?
                .unwrap_or_default(),
            phase: optional(obj, "phase", "the electrical phase", parse_enum)?,
            location: optional(obj, "location", "the measurement location", parse_enum)?,
            unit_of_measure: read_opt_nested(obj, "unitOfMeasure", "the unit of measure", ext)?,
        };
        Ok(ext.after_parse("sampledValue", obj, sample))
    }
}

impl JsonWrite for SampledValue {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("value".to_string(), Value::from(self.value));
        // Defaulted vocabulary values stay off the wire.
        if self.context != ReadingContext::default() {
            obj.insert("context".to_string(), enum_value(&self.context));
        }
        if self.measurand != Measurand::default() {
            obj.insert("measurand".to_string(), enum_value(&self.measurand));
        }
        put_opt(&mut obj, "phase", self.phase.as_ref().map(enum_value));
        put_opt(&mut obj, "location", self.location.as_ref().map(enum_value));
        put_opt(
            &mut obj,
            "unitOfMeasure",
            self.unit_of_measure.as_ref().map(|u| u.write_json(ext)),
        );
        Value::Object(ext.before_serialize("sampledValue", obj))
    }
}

impl JsonRead for MeterValue {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let meter_value = MeterValue {
            timestamp: required(obj, "timestamp", "the sampling timestamp", parse_timestamp)?,
            sampled_values: super::read_vec(obj, "sampledValue", "the sampled values", ext)?,
        };
        Ok(ext.after_parse("meterValue", obj, meter_value))
    }
}

impl JsonWrite for MeterValue {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = JsonObject::new();
        obj.insert("timestamp".to_string(), timestamp_value(&self.timestamp));
        obj.insert(
            "sampledValue".to_string(),
            write_vec(&self.sampled_values, ext),
        );
        Value::Object(ext.before_serialize("meterValue", obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use types::Phase;

    #[test]
    fn sampled_value_round_trip_preserves_non_defaults() {
        let ext = Ext::disabled("MeterValues");
        let sample = SampledValue::new(229.9)
            .with_measurand(Measurand::Voltage)
            .with_phase(Phase::L1N)
            .with_unit(UnitOfMeasure::new("V"));
        let wire = sample.write_json(&ext);
        assert_eq!(wire["measurand"], json!("Voltage"));
        assert_eq!(wire["phase"], json!("L1-N"));
        assert!(wire.get("context").is_none());
        assert_eq!(SampledValue::read_json(&wire, &ext).unwrap(), sample);
    }

    #[test]
    fn defaulted_vocabulary_stays_off_the_wire() {
        let ext = Ext::disabled("MeterValues");
        let wire = SampledValue::new(42.0).write_json(&ext);
        assert_eq!(wire, json!({ "value": 42.0 }));
    }

    #[test]
    fn meter_value_preserves_sample_order() {
        let ext = Ext::disabled("MeterValues");
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mv = MeterValue::new(
            at,
            vec![
                SampledValue::new(1.0),
                SampledValue::new(2.0),
                SampledValue::new(1.0),
            ],
        );
        let parsed = MeterValue::read_json(&mv.write_json(&ext), &ext).unwrap();
        assert_eq!(parsed, mv);
        let values: Vec<f64> = parsed.sampled_values.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn missing_sampled_values_is_a_contract_violation() {
        let ext = Ext::disabled("MeterValues");
        let err = MeterValue::read_json(
            &json!({ "timestamp": "2026-03-01T12:00:00Z" }),
            &ext,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required property 'sampledValue': the sampled values"
        );
    }
}
