//! Construction and serialisation rules for domain errors.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("in use"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn checked_rejects_blank_messages() {
    let result = Error::checked(ErrorCode::NotFound, "  \t");
    assert_eq!(result, Err(EnvelopeError::BlankMessage));
}

#[rstest]
fn blank_messages_fall_back_to_the_summary() {
    let error = Error::new(ErrorCode::Conflict, " ");
    assert_eq!(error.message(), "conflict");
}

#[rstest]
fn blank_trace_ids_are_ignored() {
    let error = Error::not_found("missing")
        .with_trace_id(TRACE_ID)
        .with_trace_id(" ");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("Pupil not found") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_to_snake_case_envelope() {
    let error = Error::forbidden("Cannot delete predefined category").with_trace_id(TRACE_ID);
    let value = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "forbidden",
            "message": "Cannot delete predefined category",
            "trace_id": TRACE_ID,
        })
    );
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({"code": "not_found", "message": " "}));
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_rejects_blank_trace_id() {
    let result: Result<Error, _> = serde_json::from_value(
        json!({"code": "not_found", "message": "missing", "trace_id": ""}),
    );
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialisation_ignores_ambient_trace(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async {
        serde_json::from_value::<Error>(json!({"code": "conflict", "message": "in use"}))
            .expect("payload is valid")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn validation_lists_every_field() {
    let error = Error::validation(vec![
        FieldViolation::blank("first_name"),
        FieldViolation::too_long("last_name", 100),
    ]);
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields = &error.details().expect("details are attached")["fields"];
    assert_eq!(fields[0]["field"], "first_name");
    assert_eq!(fields[0]["code"], "blank");
    assert_eq!(fields[1]["field"], "last_name");
    assert_eq!(fields[1]["code"], "too_long");
}

#[rstest]
fn unknown_reference_names_field_and_entity() {
    let error = Error::unknown_reference("class_id", "Class", 42);
    let field = &error.details().expect("details are attached")["fields"][0];
    assert_eq!(field["field"], "class_id");
    assert_eq!(field["code"], "unknown_reference");
    assert_eq!(field["message"], "Class 42 does not exist");
}
