//! Wire codec for the open vendor-extension bag

use super::{expect_object, parse_string, required, JsonRead, JsonWrite};
use crate::error::CodecError;
use crate::extensions::Ext;
use serde_json::Value;
use types::CustomData;

const NESTED: &str = "customData";

impl JsonRead for CustomData {
    fn read_json(value: &Value, ext: &Ext<'_>) -> Result<Self, CodecError> {
        let obj = expect_object(value)?;
        let vendor_id = required(obj, "vendorId", "the custom-data vendor identifier", parse_string)?;
        let mut properties = obj.clone();
        properties.remove("vendorId");
        let data = CustomData {
            vendor_id,
            properties,
        };
        Ok(ext.after_parse(NESTED, obj, data))
    }
}

impl JsonWrite for CustomData {
    fn write_json(&self, ext: &Ext<'_>) -> Value {
        let mut obj = self.properties.clone();
        obj.insert("vendorId".to_string(), Value::String(self.vendor_id.clone()));
        Value::Object(ext.before_serialize(NESTED, obj))
    }
}
