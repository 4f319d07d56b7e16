//! Regression coverage for domain error construction and serialisation.

use rstest::rstest;
use serde_json::json;

use super::*;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::quota_exceeded("limit reached"), ErrorCode::QuotaExceeded)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn details_round_trip_through_serde() {
    let error = Error::invalid_request("chosenOption must be one of the question options")
        .with_details(json!({ "field": "chosenOption", "value": "F" }));

    let serialized = serde_json::to_value(&error).expect("serialises");
    assert_eq!(serialized["code"], "invalid_request");
    assert_eq!(serialized["details"]["field"], "chosenOption");

    let decoded: Error = serde_json::from_value(serialized).expect("deserialises");
    assert_eq!(decoded, error);
}

#[rstest]
fn serialisation_omits_absent_optional_fields() {
    let error = Error::not_found("question not found");

    let serialized = serde_json::to_value(&error).expect("serialises");
    let object = serialized.as_object().expect("object payload");
    assert!(!object.contains_key("details"));
    assert!(!object.contains_key("traceId"));
}

#[rstest]
fn quota_code_uses_snake_case_wire_name() {
    let serialized = serde_json::to_value(ErrorCode::QuotaExceeded).expect("serialises");
    assert_eq!(serialized, json!("quota_exceeded"));
}

#[rstest]
fn with_trace_id_overrides_ambient_value() {
    let error = Error::internal("boom").with_trace_id("cafebabe");
    assert_eq!(error.trace_id(), Some("cafebabe"));
}

#[rstest]
fn display_renders_message() {
    let error = Error::not_found("rank ladder missing");
    assert_eq!(error.to_string(), "rank ladder missing");
}
