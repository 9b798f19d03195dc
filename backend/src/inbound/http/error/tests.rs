//! Status mapping and client-visible envelopes.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, FieldViolation};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Status, `trace-id` header and JSON body of the rendered response.
async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("Cannot delete predefined category"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Pupil not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("School year is still referenced by classes"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store offline"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_has_a_status(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(error.status_code(), status);
}

#[actix_web::test]
async fn internal_details_stay_on_the_server() {
    let error = Error::internal("password authentication failed for user tracker")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"dsn": "postgres://tracker@db"}));

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({"code": "internal_error", "message": REDACTED_MESSAGE, "trace_id": TRACE_ID})
    );
}

#[actix_web::test]
async fn field_violations_are_returned() {
    let error = Error::validation(vec![FieldViolation::missing("name")]).with_trace_id(TRACE_ID);

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["details"]["fields"][0]["field"], "name");
    assert_eq!(body["details"]["fields"][0]["code"], "missing");
}

#[actix_web::test]
async fn untraced_errors_have_no_header() {
    let (status, header, body) = render(&Error::not_found("Class not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert_eq!(body, json!({"code": "not_found", "message": "Class not found"}));
}

#[test]
fn client_errors_are_not_copied() {
    let error = Error::conflict("Pupil is still referenced by entries");
    assert!(matches!(client_view(&error), Cow::Borrowed(view) if *view == error));
}

#[test]
fn framework_errors_become_generic_internal_errors() {
    let error = Error::from(actix_web::error::ErrorBadRequest("boom"));
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), REDACTED_MESSAGE);
    assert!(error.details().is_none());
}
