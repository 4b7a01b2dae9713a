//! RequestStartTransaction / RequestStopTransaction: central-system initiated
//! charging control.
//!
//! These flow the opposite way from the rest of the catalogue: the central
//! system is the requester and the charging station answers.

use codec::field::{optional, parse_enum, parse_string, parse_u32, parse_u64, required};
use codec::wire::{enum_value, put_opt, read_nested, read_opt_nested, JsonWrite};
use codec::{CodecError, Ext, JsonObject};
use serde_json::Value;
use types::{
    combine, hash_opt, EvseId, IdToken, RemoteStartId, RequestStartStopStatus, StableHash,
    StatusInfo, TransactionId,
};

use crate::payload::{MessagePayload, RequestPayload, ResponsePayload};
use crate::result::ResponseResult;

/// Ask a charging station to start a transaction on behalf of a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStartTransactionRequest {
    /// Correlates the eventual transaction events back to this request.
    pub remote_start_id: RemoteStartId,
    pub id_token: IdToken,
    /// Absent means the station picks the EVSE.
    pub evse_id: Option<EvseId>,
    pub group_id_token: Option<IdToken>,
}

impl RequestStartTransactionRequest {
    pub fn new(remote_start_id: RemoteStartId, id_token: IdToken) -> Self {
        Self {
            remote_start_id,
            id_token,
            evse_id: None,
            group_id_token: None,
        }
    }

    pub fn with_evse_id(mut self, evse_id: EvseId) -> Self {
        self.evse_id = Some(evse_id);
        self
    }

    pub fn with_group_id_token(mut self, group_id_token: IdToken) -> Self {
        self.group_id_token = Some(group_id_token);
        self
    }
}

impl MessagePayload for RequestStartTransactionRequest {
    const ACTION: &'static str = "RequestStartTransaction";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/requestStartTransactionRequest";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("remoteStartId".to_string(), self.remote_start_id.0.into());
        obj.insert("idToken".to_string(), self.id_token.write_json(ext));
        put_opt(obj, "evseId", self.evse_id.map(|id| Value::from(id.0)));
        put_opt(
            obj,
            "groupIdToken",
            self.group_id_token.as_ref().map(|t| t.write_json(ext)),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            remote_start_id: RemoteStartId(required(
                obj,
                "remoteStartId",
                "the correlation id for the remote start",
                parse_u64,
            )?),
            id_token: read_nested(obj, "idToken", "the credential to start with", ext)?,
            evse_id: optional(obj, "evseId", "the EVSE to start on", parse_u32)?.map(EvseId),
            group_id_token: read_opt_nested(obj, "groupIdToken", "the group credential", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.remote_start_id.stable_hash(),
            self.id_token.stable_hash(),
            hash_opt(&self.evse_id),
            hash_opt(&self.group_id_token),
        ])
    }
}

impl RequestPayload for RequestStartTransactionRequest {}

/// Station's verdict on a remote start.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStartTransactionResponse {
    pub status: RequestStartStopStatus,
    /// Present when the station already knows the transaction id.
    pub transaction_id: Option<TransactionId>,
    pub status_info: Option<StatusInfo>,
}

impl RequestStartTransactionResponse {
    pub fn accepted() -> Self {
        Self {
            status: RequestStartStopStatus::Accepted,
            transaction_id: None,
            status_info: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn with_status_info(mut self, status_info: StatusInfo) -> Self {
        self.status_info = Some(status_info);
        self
    }
}

impl MessagePayload for RequestStartTransactionResponse {
    const ACTION: &'static str = "RequestStartTransaction";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/requestStartTransactionResponse";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("status".to_string(), enum_value(&self.status));
        put_opt(
            obj,
            "transactionId",
            self.transaction_id.as_ref().map(|id| id.as_str().into()),
        );
        put_opt(
            obj,
            "statusInfo",
            self.status_info.as_ref().map(|info| info.write_json(ext)),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: required(obj, "status", "the remote start verdict", parse_enum)?,
            transaction_id: optional(
                obj,
                "transactionId",
                "the started transaction",
                parse_string,
            )?
            .map(TransactionId::new),
            status_info: read_opt_nested(obj, "statusInfo", "detail on the verdict", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[
            self.status.stable_hash(),
            hash_opt(&self.transaction_id),
            hash_opt(&self.status_info),
        ])
    }
}

impl ResponsePayload for RequestStartTransactionResponse {
    type Request = RequestStartTransactionRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self {
            status: RequestStartStopStatus::Rejected,
            transaction_id: None,
            status_info: None,
        }
    }
}

/// Ask a charging station to stop a running transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStopTransactionRequest {
    pub transaction_id: TransactionId,
}

impl RequestStopTransactionRequest {
    pub fn new(transaction_id: TransactionId) -> Self {
        Self { transaction_id }
    }
}

impl MessagePayload for RequestStopTransactionRequest {
    const ACTION: &'static str = "RequestStopTransaction";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/requestStopTransactionRequest";

    fn write_fields(&self, obj: &mut JsonObject, _ext: &Ext<'_>) {
        obj.insert(
            "transactionId".to_string(),
            self.transaction_id.as_str().into(),
        );
    }

    fn read_fields(obj: &JsonObject, _ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            transaction_id: TransactionId::new(required(
                obj,
                "transactionId",
                "the transaction to stop",
                parse_string,
            )?),
        })
    }

    fn stable_hash(&self) -> u64 {
        self.transaction_id.stable_hash()
    }
}

impl RequestPayload for RequestStopTransactionRequest {}

/// Station's verdict on a remote stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStopTransactionResponse {
    pub status: RequestStartStopStatus,
    pub status_info: Option<StatusInfo>,
}

impl RequestStopTransactionResponse {
    pub fn accepted() -> Self {
        Self {
            status: RequestStartStopStatus::Accepted,
            status_info: None,
        }
    }

    pub fn with_status_info(mut self, status_info: StatusInfo) -> Self {
        self.status_info = Some(status_info);
        self
    }
}

impl MessagePayload for RequestStopTransactionResponse {
    const ACTION: &'static str = "RequestStopTransaction";
    const CONTEXT: &'static str =
        "https://voltwire.io/context/ocpp/v2.1/requestStopTransactionResponse";

    fn write_fields(&self, obj: &mut JsonObject, ext: &Ext<'_>) {
        obj.insert("status".to_string(), enum_value(&self.status));
        put_opt(
            obj,
            "statusInfo",
            self.status_info.as_ref().map(|info| info.write_json(ext)),
        );
    }

    fn read_fields(obj: &JsonObject, ext: &Ext<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            status: required(obj, "status", "the remote stop verdict", parse_enum)?,
            status_info: read_opt_nested(obj, "statusInfo", "detail on the verdict", ext)?,
        })
    }

    fn stable_hash(&self) -> u64 {
        combine(&[self.status.stable_hash(), hash_opt(&self.status_info)])
    }
}

impl ResponsePayload for RequestStopTransactionResponse {
    type Request = RequestStopTransactionRequest;

    fn rejected(_result: &ResponseResult) -> Self {
        Self {
            status: RequestStartStopStatus::Rejected,
            status_info: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::IdTokenType;

    #[test]
    fn start_request_round_trips() {
        let request = RequestStartTransactionRequest::new(
            RemoteStartId(77),
            IdToken::new("04E1C6AA", IdTokenType::Iso14443),
        )
        .with_evse_id(EvseId(2));
        let ext = Ext::disabled(RequestStartTransactionRequest::ACTION);
        let mut obj = JsonObject::new();
        request.write_fields(&mut obj, &ext);
        assert!(!obj.contains_key("groupIdToken"));
        let parsed = RequestStartTransactionRequest::read_fields(&obj, &ext).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn stop_response_defaults_to_rejected_on_failure() {
        let rejected = RequestStopTransactionResponse::rejected(&ResponseResult::ok());
        assert_eq!(rejected.status, RequestStartStopStatus::Rejected);
        assert!(rejected.status_info.is_none());
    }

    #[test]
    fn start_response_carries_transaction_id() {
        let response = RequestStartTransactionResponse::accepted()
            .with_transaction_id(TransactionId::new("txn-9917"));
        let ext = Ext::disabled(RequestStartTransactionResponse::ACTION);
        let mut obj = JsonObject::new();
        response.write_fields(&mut obj, &ext);
        assert_eq!(obj["transactionId"], "txn-9917");
        let parsed = RequestStartTransactionResponse::read_fields(&obj, &ext).unwrap();
        assert_eq!(parsed, response);
    }
}
