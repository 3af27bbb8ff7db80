//! Request validation helpers shared by the HTTP handlers.
//!
//! Failures become `invalid_request` errors whose `details` name the offending
//! field and a machine-readable code, e.g.
//! `{"field": "email", "code": "invalid_email"}`.

use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::{ContactValidationError, Error, LoginValidationError};

/// Build an `invalid_request` error carrying `field` and `code` details.
pub(crate) fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn contact_validation_error(err: ContactValidationError) -> Error {
    field_error(err.to_string(), err.field().as_str(), err.code())
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    field_error(err.to_string(), field, code)
}

/// Reject a number that parsed as negative.
pub(crate) fn non_negative(value: i64, field: &str) -> Result<u64, Error> {
    u64::try_from(value)
        .map_err(|_| field_error(format!("{field} must be a non-negative integer"), field, "out_of_range"))
}

fn extractor_error(kind: &'static str, err: impl std::fmt::Display) -> actix_web::Error {
    debug!(kind, error = %err, "request extraction failed");
    Error::invalid_request(format!("invalid {kind}: {err}"))
        .with_details(json!({ "code": format!("invalid_{kind}") }))
        .into()
}

/// JSON body extractor config that answers with the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| extractor_error("body", err))
}

/// Query string extractor config that answers with the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| extractor_error("query", err))
}

/// Path extractor config that answers with the error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| extractor_error("path", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactField, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[case(ContactValidationError::Empty { field: ContactField::Name }, "name", "empty")]
    #[case(
        ContactValidationError::TooLong { field: ContactField::PhoneNumber, max: 50 },
        "phoneNumber",
        "too_long"
    )]
    #[case(ContactValidationError::InvalidEmail, "email", "invalid_email")]
    fn contact_errors_name_field_and_code(
        #[case] err: ContactValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = contact_validation_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.details(), Some(&json!({"field": field, "code": code})));
    }

    #[rstest]
    #[case(LoginValidationError::EmptyUsername, "username must not be empty")]
    #[case(LoginValidationError::EmptyPassword, "password must not be empty")]
    fn login_errors_keep_display_message(#[case] err: LoginValidationError, #[case] message: &str) {
        assert_eq!(login_validation_error(err).message(), message);
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(30, Some(30))]
    #[case(4_294_967_296, Some(4_294_967_296))]
    #[case(i64::MAX, Some(9_223_372_036_854_775_807))]
    #[case(-1, None)]
    fn non_negative_rejects_negative_values(#[case] raw: i64, #[case] expected: Option<u64>) {
        assert_eq!(non_negative(raw, "days").ok(), expected);
    }
}
