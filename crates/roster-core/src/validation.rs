//! Validation utilities.

use crate::{ApiError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `ApiError` on failure.
    fn validate_request(&self) -> Result<(), ApiError> {
        self.validate().map_err(validation_errors_to_api_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by
/// field name so messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `ApiError`.
#[must_use]
pub fn validation_errors_to_api_error(errors: ValidationErrors) -> ApiError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    ApiError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    /// Validates a personal name: one ASCII capital followed by lowercase
    /// ASCII letters only (`Ivan`, not `ivan`, `IVAN` or `Jean-Luc`).
    pub fn proper_name(value: &str) -> Result<(), ValidationError> {
        let mut chars = value.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && !chars.as_str().is_empty()
            && chars.all(|c| c.is_ascii_lowercase());

        if valid {
            Ok(())
        } else {
            Err(ValidationError::new("proper_name").with_message(Cow::Borrowed(
                "must be a capital letter followed by lowercase letters",
            )))
        }
    }

    /// Validates a gender value (`male` or `female`).
    pub fn gender(value: &str) -> Result<(), ValidationError> {
        value.parse::<crate::Gender>().map(|_| ()).map_err(|_| {
            ValidationError::new("gender").with_message(Cow::Borrowed("must be male or female"))
        })
    }

    /// Validates a status value (`active`, `banned` or `deleted`).
    pub fn user_status(value: &str) -> Result<(), ValidationError> {
        value.parse::<crate::UserStatus>().map(|_| ()).map_err(|_| {
            ValidationError::new("status")
                .with_message(Cow::Borrowed("must be active, banned or deleted"))
        })
    }
}
