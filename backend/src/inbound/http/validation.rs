//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, OptionLabel};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidOptionLabel,
    InvalidResponseTime,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidOptionLabel => "invalid_option_label",
            ErrorCode::InvalidResponseTime => "invalid_response_time",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_field(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a UUID-bearing field.
pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| {
        invalid_field(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            &value,
        )
    })
}

/// Parse an option-label field ("A" through "E").
pub(crate) fn parse_option_label(value: String, field: FieldName) -> Result<OptionLabel, Error> {
    value.parse().map_err(|_| {
        invalid_field(
            field,
            format!("{} must be one of A, B, C, D, E", field.as_str()),
            ErrorCode::InvalidOptionLabel,
            &value,
        )
    })
}

/// Validate an optional response-time measurement in seconds.
pub(crate) fn parse_response_time(
    value: Option<i32>,
    field: FieldName,
) -> Result<Option<i32>, Error> {
    match value {
        Some(seconds) if seconds < 0 => Err(invalid_field(
            field,
            format!("{} must not be negative", field.as_str()),
            ErrorCode::InvalidResponseTime,
            &seconds.to_string(),
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;

    #[rstest]
    fn parse_uuid_accepts_canonical_form() {
        let parsed = parse_uuid(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
            FieldName::new("questionId"),
        )
        .expect("valid uuid");
        assert_eq!(parsed.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn parse_uuid_reports_field_and_code() {
        let error = parse_uuid("banana".to_owned(), FieldName::new("questionId"))
            .expect_err("invalid uuid");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        let details = error.details().expect("details attached");
        assert_eq!(details["field"], "questionId");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn parse_option_label_accepts_both_cases() {
        let parsed = parse_option_label("c".to_owned(), FieldName::new("chosenOption"))
            .expect("valid label");
        assert_eq!(parsed, OptionLabel::C);
    }

    #[rstest]
    fn parse_option_label_rejects_unknown_letters() {
        let error = parse_option_label("F".to_owned(), FieldName::new("chosenOption"))
            .expect_err("invalid label");
        let details = error.details().expect("details attached");
        assert_eq!(details["code"], "invalid_option_label");
        assert_eq!(details["value"], "F");
    }

    #[rstest]
    fn parse_response_time_rejects_negative_values() {
        let error = parse_response_time(Some(-5), FieldName::new("responseTimeSeconds"))
            .expect_err("negative rejected");
        let details = error.details().expect("details attached");
        assert_eq!(details["code"], "invalid_response_time");
    }

    #[rstest]
    fn parse_response_time_passes_through_valid_values() {
        assert_eq!(
            parse_response_time(Some(30), FieldName::new("responseTimeSeconds"))
                .expect("valid value"),
            Some(30)
        );
        assert_eq!(
            parse_response_time(None, FieldName::new("responseTimeSeconds")).expect("absent ok"),
            None
        );
    }
}
