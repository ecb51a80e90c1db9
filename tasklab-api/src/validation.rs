/// Request validation helper
///
/// Request structs declare their rules with `#[derive(Validate)]`; this
/// module converts the resulting `ValidationErrors` into the structured
/// `{field, rule, value}` list the API reports, and provides the custom
/// rules for status enum membership.

use crate::error::{ApiError, FieldError};
use std::borrow::Cow;
use tasklab_shared::models::task::{StatusFilter, TaskStatus};
use validator::{Validate, ValidationError};

/// Validates a decoded request struct
///
/// Returns `ApiError::ValidationError` carrying one `{field, rule,
/// value}` entry per failed rule.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let errors: Vec<FieldError> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    rule: error.code.to_string(),
                    value: error
                        .params
                        .get("value")
                        .cloned()
                        .unwrap_or(serde_json::Value::Null),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    })
}

/// Custom rule: status must be one of `todo`, `inprogress`, `done`
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if TaskStatus::parse(status).is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("oneof");
    error.add_param(Cow::from("value"), &status);
    Err(error)
}

/// Custom rule: status filter must be `all` or one of the status values
pub fn validate_status_filter(status: &str) -> Result<(), ValidationError> {
    if StatusFilter::parse(status).is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("oneof");
    error.add_param(Cow::from("value"), &status);
    Err(error)
}
