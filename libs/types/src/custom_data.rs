//! Open vendor-extension bag
//!
//! Every message and nested object may carry a [`CustomData`] block: a
//! vendor identifier plus arbitrary additional properties. The contents are
//! opaque to the core; they participate in equality and hashing by value.

use crate::hashing::{combine, hash_json, StableHash};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vendor-specific extension data attached to a message or nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomData {
    /// Identifier of the vendor defining the extra properties.
    #[serde(rename = "vendorId")]
    pub vendor_id: String,

    /// Any additional properties, passed through untouched.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl CustomData {
    pub fn new(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

impl StableHash for CustomData {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.vendor_id.stable_hash(),
            hash_json(&Value::Object(self.properties.clone())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_and_hash_are_value_based() {
        let a = CustomData::new("com.example").with_property("depth", json!(3));
        let b = CustomData::new("com.example").with_property("depth", json!(3));
        let c = CustomData::new("com.example").with_property("depth", json!(4));
        assert_eq!(a, b);
        assert_eq!(a.stable_hash(), b.stable_hash());
        assert_ne!(a, c);
    }

    #[test]
    fn extra_properties_round_trip_through_serde() {
        let data = CustomData::new("com.example").with_property("mode", json!("eco"));
        let wire = serde_json::to_value(&data).unwrap();
        assert_eq!(wire["vendorId"], json!("com.example"));
        assert_eq!(wire["mode"], json!("eco"));
        let back: CustomData = serde_json::from_value(wire).unwrap();
        assert_eq!(back, data);
    }
}
