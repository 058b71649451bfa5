//! Request validation helpers shared by the handlers.
//!
//! Every failure is a `400 invalid_request` whose details name the offending
//! field and a machine-readable code.

use serde_json::json;

use crate::domain::{ApplicationStatus, Error, OpportunityId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidStatus,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidStatus => "invalid_status",
        }
    }
}

/// Wire name of a request field (camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const OPPORTUNITY_ID: FieldName = FieldName::new("opportunityId");
pub(crate) const STUDENT_ID: FieldName = FieldName::new("studentId");
pub(crate) const STATUS: FieldName = FieldName::new("status");

fn field_error(
    field: FieldName,
    message: String,
    code: ValidationCode,
    value: Option<&str>,
) -> Error {
    let details = match value {
        Some(value) => json!({"field": field.as_str(), "value": value, "code": code.as_str()}),
        None => json!({"field": field.as_str(), "code": code.as_str()}),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ValidationCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    field_error(
        field,
        format!("{} must be a valid UUID", field.as_str()),
        ValidationCode::InvalidUuid,
        Some(value),
    )
}

/// Unwrap an optional request field or report it missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_opportunity_id(value: &str, field: FieldName) -> Result<OpportunityId, Error> {
    OpportunityId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a review decision; anything outside the allowed set is rejected
/// before any store is touched.
pub(crate) fn parse_status(value: &str) -> Result<ApplicationStatus, Error> {
    value.parse().map_err(|_| {
        field_error(
            STATUS,
            "status must be one of pending, accepted, rejected".to_owned(),
            ValidationCode::InvalidStatus,
            Some(value),
        )
    })
}
