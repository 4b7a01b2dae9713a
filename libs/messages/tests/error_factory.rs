//! Error-factory integration tests
//!
//! The factory is the fault boundary of a serving node: whatever went wrong,
//! the peer gets back a well-formed response correlated to its request.

use std::sync::Arc;

use codec::ExtensionRegistry;
use messages::{
    AuthorizeRequest, AuthorizeResponse, BootNotificationRequest, BootNotificationResponse,
    Request, RequestStartTransactionRequest, RequestStartTransactionResponse, Response,
    ResultKind,
};
use types::{
    AuthorizationStatus, BootReason, ChargingStation, Destination, IdToken, IdTokenType,
    NetworkPath, NodeId, RegistrationStatus, RemoteStartId, RequestStartStopStatus,
};

fn authorize_request() -> Arc<Request<AuthorizeRequest>> {
    Arc::new(Request::new(
        Destination::csms(),
        AuthorizeRequest::new(IdToken::new("04E1C6AA", IdTokenType::Iso14443)),
    ))
}

#[test]
fn every_factory_variant_correlates_to_the_request() {
    let request = authorize_request();
    let responses = vec![
        Response::<AuthorizeResponse>::formation_violation(
            Arc::clone(&request),
            "missing required property 'idToken': the credential to authorize",
        ),
        Response::signature_error(Arc::clone(&request), "key-1 failed verification"),
        Response::request_error(
            Arc::clone(&request),
            "NotSupported",
            Some("action disabled by operator".to_string()),
            None,
        ),
        Response::failed(Arc::clone(&request), None),
        Response::exception_occurred(Arc::clone(&request), "database connection lost"),
    ];

    for response in &responses {
        assert_eq!(response.request_id(), request.request_id());
        assert!(!response.result().is_ok());
    }

    let kinds: Vec<ResultKind> = responses.iter().map(|r| r.result().kind).collect();
    assert_eq!(
        kinds,
        vec![
            ResultKind::FormationViolation,
            ResultKind::SignatureError,
            ResultKind::RequestError,
            ResultKind::InternalError,
            ResultKind::ExceptionOccurred,
        ]
    );
}

#[test]
fn formation_violation_on_authorize_yields_parsing_error_verdict() {
    let response =
        Response::<AuthorizeResponse>::formation_violation(authorize_request(), "bad document");
    assert_eq!(
        response.payload().id_token_info.status,
        AuthorizationStatus::ParsingError
    );
    assert!(response.payload().id_token_info.status.is_denied());
}

#[test]
fn signature_error_on_authorize_yields_signature_verdict() {
    let response =
        Response::<AuthorizeResponse>::signature_error(authorize_request(), "stale key");
    assert_eq!(
        response.payload().id_token_info.status,
        AuthorizationStatus::SignatureError
    );
}

#[test]
fn other_failures_on_authorize_yield_invalid_verdict() {
    let response = Response::<AuthorizeResponse>::failed(authorize_request(), None);
    assert_eq!(
        response.payload().id_token_info.status,
        AuthorizationStatus::Invalid
    );
}

#[test]
fn boot_rejection_carries_zero_retry_interval() {
    let request = Arc::new(Request::new(
        Destination::csms(),
        BootNotificationRequest::new(
            ChargingStation::new("VW-220", "Voltwire"),
            BootReason::Watchdog,
        ),
    ));
    let response = Response::<BootNotificationResponse>::exception_occurred(
        request,
        "registry unavailable",
    );
    assert_eq!(response.payload().status, RegistrationStatus::Rejected);
    assert!(response.payload().interval.is_zero());
}

#[test]
fn remote_start_rejection_has_no_transaction() {
    let request = Arc::new(Request::new(
        Destination::node(NodeId::new("cp-3")),
        RequestStartTransactionRequest::new(
            RemoteStartId(5),
            IdToken::new("04AA", IdTokenType::Central),
        ),
    ));
    let response = Response::<RequestStartTransactionResponse>::request_error(
        request,
        "Rejected",
        Some("EVSE occupied".to_string()),
        None,
    );
    assert_eq!(response.payload().status, RequestStartStopStatus::Rejected);
    assert!(response.payload().transaction_id.is_none());
}

#[test]
fn error_responses_serialize_without_result_in_the_body() {
    let response = Response::<AuthorizeResponse>::failed(authorize_request(), None);
    let document = response.to_json(&ExtensionRegistry::new());
    let obj = document.as_object().unwrap();
    // Outcome and correlation ride the envelope, never the JSON body.
    assert!(!obj.contains_key("result"));
    assert!(!obj.contains_key("requestId"));
    assert!(obj.contains_key("idTokenInfo"));
}

#[test]
fn error_responses_route_back_along_the_recorded_path() {
    let request = Arc::new(
        Request::new(
            Destination::csms(),
            AuthorizeRequest::new(IdToken::new("04CC", IdTokenType::Local)),
        )
        .with_network_path(
            NetworkPath::empty()
                .with_hop(NodeId::new("cp-1"))
                .with_hop(NodeId::new("gw-2")),
        ),
    );
    let response = Response::<AuthorizeResponse>::failed(Arc::clone(&request), None);
    assert_eq!(
        response.destination().resolve(),
        vec![NodeId::new("gw-2"), NodeId::new("cp-1")]
    );

    // With no recorded path the reply falls back to the direct peer.
    let direct = Response::<AuthorizeResponse>::failed(authorize_request(), None);
    assert_eq!(direct.destination(), &Destination::node(NodeId::zero()));
}
