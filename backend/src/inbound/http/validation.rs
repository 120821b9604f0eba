//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors are mapped to `invalid_request` with a `details`
//! object naming the offending field and a stable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    ComplaintValidationError, EmailValidationError, Error, IdTokenValidationError,
    MissingFieldError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidEmail,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

fn field_error(field: &str, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(err: MissingFieldError) -> Error {
    field_error(err.field, err.to_string(), ValidationCode::MissingField)
}

pub(crate) fn invalid_email_error(field: &str, err: &EmailValidationError) -> Error {
    field_error(field, format!("{field} is invalid: {err}"), ValidationCode::InvalidEmail)
}

pub(crate) fn complaint_validation_error(err: ComplaintValidationError) -> Error {
    match err {
        ComplaintValidationError::MissingField(missing) => missing_field_error(missing),
        ComplaintValidationError::InvalidEmail(invalid) => {
            invalid_email_error("reporterEmail", &invalid)
        }
    }
}

pub(crate) fn id_token_error(err: IdTokenValidationError) -> Error {
    match err {
        IdTokenValidationError::Empty => missing_field_error(MissingFieldError { field: "idToken" }),
    }
}

/// Parse a path segment as a UUID.
pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": value,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}
