//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on reasonable UX limits for names, notes
//! and descriptions; the embedded database does not enforce lengths.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: room number, guest name, expense category, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special requests
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, id_proof, currency code, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a monetary amount is finite and non-negative.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("101", "room_number", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "room_number", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "room_number", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_amount() {
        assert!(validate_amount(0.0, "amount").is_ok());
        assert!(validate_amount(120.50, "amount").is_ok());
        assert!(validate_amount(-1.0, "amount").is_err());
        assert!(validate_amount(f64::NAN, "amount").is_err());
        assert!(validate_amount(f64::INFINITY, "amount").is_err());
    }
}
