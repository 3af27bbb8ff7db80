//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn decode(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("response body is readable");
    let payload = serde_json::from_slice(&bytes).expect("body is an error envelope");
    (status, header, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Contact not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("email already registered"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("pool exhausted"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(trace_id.clone())
        .with_details(json!({"sql": "select 1"}));

    let (status, header, payload) = decode(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflict_details_reach_the_client(trace_id: String) {
    let details = json!({"field": "email", "code": "duplicate_email", "value": "ann@example.com"});
    let error = Error::conflict("email already registered")
        .with_trace_id(trace_id)
        .with_details(details.clone());

    let (status, header, payload) = decode(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.details(), Some(&details));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_the_header() {
    let error = Error::not_found("Contact not found");

    let (status, header, payload) = decode(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert_eq!(payload.message(), "Contact not found");
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn redaction_leaves_client_errors_untouched() {
    let error = Error::invalid_request("name must not be empty")
        .with_details(json!({"field": "name", "code": "empty"}));
    assert_eq!(redact_if_internal(&error), error);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
