//! Meter value samples and their measurement vocabulary
//!
//! Meter values are temporally ordered: both the list of [`MeterValue`]
//! groups and the [`SampledValue`] entries inside each group are
//! order-significant sequences. Two reports differing only in sample order
//! are distinct messages.

use crate::hashing::{combine, hash_opt, hash_seq, StableHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When, within a transaction, a sample was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingContext {
    #[serde(rename = "Interruption.Begin")]
    InterruptionBegin,
    #[serde(rename = "Interruption.End")]
    InterruptionEnd,
    Other,
    #[serde(rename = "Sample.Clock")]
    SampleClock,
    #[default]
    #[serde(rename = "Sample.Periodic")]
    SamplePeriodic,
    #[serde(rename = "Transaction.Begin")]
    TransactionBegin,
    #[serde(rename = "Transaction.End")]
    TransactionEnd,
    Trigger,
}

impl StableHash for ReadingContext {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// What a sample measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measurand {
    #[serde(rename = "Current.Export")]
    CurrentExport,
    #[serde(rename = "Current.Import")]
    CurrentImport,
    #[serde(rename = "Current.Offered")]
    CurrentOffered,
    #[serde(rename = "Energy.Active.Export.Register")]
    EnergyActiveExportRegister,
    #[default]
    #[serde(rename = "Energy.Active.Import.Register")]
    EnergyActiveImportRegister,
    #[serde(rename = "Energy.Reactive.Export.Register")]
    EnergyReactiveExportRegister,
    #[serde(rename = "Energy.Reactive.Import.Register")]
    EnergyReactiveImportRegister,
    Frequency,
    #[serde(rename = "Power.Active.Import")]
    PowerActiveImport,
    #[serde(rename = "Power.Offered")]
    PowerOffered,
    SoC,
    Voltage,
}

impl StableHash for Measurand {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Which phase a sample refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    L1,
    L2,
    L3,
    N,
    #[serde(rename = "L1-N")]
    L1N,
    #[serde(rename = "L2-N")]
    L2N,
    #[serde(rename = "L3-N")]
    L3N,
    #[serde(rename = "L1-L2")]
    L1L2,
    #[serde(rename = "L2-L3")]
    L2L3,
    #[serde(rename = "L3-L1")]
    L3L1,
}

impl StableHash for Phase {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Where the measurement was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurandLocation {
    Body,
    Cable,
    #[serde(rename = "EV")]
    Ev,
    Inlet,
    Outlet,
}

impl StableHash for MeasurandLocation {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Unit of a sampled value, with a decimal multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    /// Unit symbol, e.g. `Wh` or `A`.
    pub unit: String,
    /// Power-of-ten multiplier applied to the value; 0 means none.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub multiplier: i32,
}

fn is_zero(m: &i32) -> bool {
    *m == 0
}

impl UnitOfMeasure {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            multiplier: 0,
        }
    }
}

impl StableHash for UnitOfMeasure {
    fn stable_hash(&self) -> u64 {
        combine(&[self.unit.stable_hash(), (self.multiplier as u64).stable_hash()])
    }
}

/// One measured sample.
///
/// `context` and `measurand` have documented defaults (`Sample.Periodic`,
/// `Energy.Active.Import.Register`) applied when the wire document omits
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledValue {
    pub value: f64,
    #[serde(default)]
    pub context: ReadingContext,
    #[serde(default)]
    pub measurand: Measurand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<MeasurandLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
}

impl SampledValue {
    /// A sample with default context and measurand and no optional metadata.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            context: ReadingContext::default(),
            measurand: Measurand::default(),
            phase: None,
            location: None,
            unit_of_measure: None,
        }
    }

    pub fn with_measurand(mut self, measurand: Measurand) -> Self {
        self.measurand = measurand;
        self
    }

    pub fn with_context(mut self, context: ReadingContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit_of_measure = Some(unit);
        self
    }
}

impl StableHash for SampledValue {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.value.stable_hash(),
            self.context.stable_hash(),
            self.measurand.stable_hash(),
            hash_opt(&self.phase),
            hash_opt(&self.location),
            hash_opt(&self.unit_of_measure),
        ])
    }
}

/// A timestamped group of samples taken together.
///
/// Samples preserve their reported order and any duplicates: equality and
/// hashing over `sampled_values` are order-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValue {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "sampledValue")]
    pub sampled_values: Vec<SampledValue>,
}

impl MeterValue {
    pub fn new(timestamp: DateTime<Utc>, sampled_values: Vec<SampledValue>) -> Self {
        Self {
            timestamp,
            sampled_values,
        }
    }
}

impl StableHash for MeterValue {
    fn stable_hash(&self) -> u64 {
        combine(&[self.timestamp.stable_hash(), hash_seq(&self.sampled_values)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sample_order_distinguishes_meter_values() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = SampledValue::new(100.0);
        let b = SampledValue::new(250.0).with_measurand(Measurand::Voltage);
        let forward = MeterValue::new(at, vec![a.clone(), b.clone()]);
        let backward = MeterValue::new(at, vec![b, a]);
        assert_ne!(forward, backward);
        assert_ne!(forward.stable_hash(), backward.stable_hash());
    }

    #[test]
    fn duplicate_samples_are_preserved() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let sample = SampledValue::new(100.0);
        let doubled = MeterValue::new(at, vec![sample.clone(), sample.clone()]);
        assert_eq!(doubled.sampled_values.len(), 2);
        assert_ne!(doubled, MeterValue::new(at, vec![sample]));
    }

    #[test]
    fn omitted_context_and_measurand_default_on_the_wire() {
        let parsed: SampledValue = serde_json::from_value(serde_json::json!({
            "value": 42.5
        }))
        .unwrap();
        assert_eq!(parsed.context, ReadingContext::SamplePeriodic);
        assert_eq!(parsed.measurand, Measurand::EnergyActiveImportRegister);
        assert!(parsed.phase.is_none());
    }

    #[test]
    fn dotted_wire_names() {
        assert_eq!(
            serde_json::to_value(Measurand::EnergyActiveImportRegister).unwrap(),
            serde_json::json!("Energy.Active.Import.Register")
        );
        assert_eq!(
            serde_json::to_value(ReadingContext::TransactionBegin).unwrap(),
            serde_json::json!("Transaction.Begin")
        );
    }
}
