//! Charging-station descriptors, connector status and transaction vocabulary

use crate::hashing::{combine, hash_opt, StableHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an EVSE within a charging station. Zero addresses the
/// station as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvseId(pub u32);

impl fmt::Display for EvseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StableHash for EvseId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Identifier of a connector within an EVSE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub u32);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StableHash for ConnectorId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Station-assigned identifier of one charging transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StableHash for TransactionId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u32);

impl StableHash for ReservationId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Sender-assigned identifier of a remote-start attempt, echoed back in the
/// transaction events it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteStartId(pub u64);

impl StableHash for RemoteStartId {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}

/// Wireless modem fitted to a charging station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,
}

impl StableHash for Modem {
    fn stable_hash(&self) -> u64 {
        combine(&[hash_opt(&self.iccid), hash_opt(&self.imsi)])
    }
}

/// Physical charging station identity, reported at boot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub model: String,
    pub vendor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modem: Option<Modem>,
}

impl ChargingStation {
    pub fn new(model: impl Into<String>, vendor_name: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            vendor_name: vendor_name.into(),
            serial_number: None,
            firmware_version: None,
            modem: None,
        }
    }

    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = Some(version.into());
        self
    }
}

impl StableHash for ChargingStation {
    fn stable_hash(&self) -> u64 {
        combine(&[
            self.model.stable_hash(),
            self.vendor_name.stable_hash(),
            hash_opt(&self.serial_number),
            hash_opt(&self.firmware_version),
            hash_opt(&self.modem),
        ])
    }
}

/// Why a charging station (re)booted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootReason {
    ApplicationReset,
    FirmwareUpdate,
    LocalReset,
    PowerUp,
    RemoteReset,
    ScheduledReset,
    Triggered,
    Unknown,
    Watchdog,
}

impl StableHash for BootReason {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Central system's verdict on a boot notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Accepted,
    Pending,
    Rejected,
}

impl StableHash for RegistrationStatus {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Current availability of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorStatus {
    Available,
    Occupied,
    Reserved,
    Unavailable,
    Faulted,
}

impl StableHash for ConnectorStatus {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Verdict on a remote start/stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStartStopStatus {
    Accepted,
    Rejected,
}

impl StableHash for RequestStartStopStatus {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Verdict on a reservation cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReservationStatus {
    Accepted,
    Rejected,
}

impl StableHash for CancelReservationStatus {
    fn stable_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

/// Machine-readable detail attached to a status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Predefined reason code for the status.
    pub reason_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl StatusInfo {
    pub fn new(reason_code: impl Into<String>) -> Self {
        Self {
            reason_code: reason_code.into(),
            additional_info: None,
        }
    }
}

impl StableHash for StatusInfo {
    fn stable_hash(&self) -> u64 {
        combine(&[self.reason_code.stable_hash(), hash_opt(&self.additional_info)])
    }
}
