//! Common validation helpers used by the domain request types.

use validator::{ValidateEmail, ValidationError};

/// Builds a field-level validation error with a code and message.
pub fn field_error(code: &'static str, message: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    err
}

/// Number of non-whitespace-delimited characters after trimming.
pub fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Whether an optional string carries any non-whitespace text.
pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Validates an optional email field where an empty string means "not given".
pub fn validate_email_or_empty(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.validate_email() {
        Ok(())
    } else {
        Err(field_error(
            "email_format",
            "Please enter a valid email address.",
        ))
    }
}
