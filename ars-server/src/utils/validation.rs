//! Input validation helpers
//!
//! Centralized text length limits and checks used by the CRUD handlers.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: student, course, inventory item
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, remarks
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, bill number, shift, gender, category
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Upper bound for any single money value
pub const MAX_AMOUNT: f64 = 100_000_000.0;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .for_field(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .for_field(field));
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
        ))
        .for_field(field));
    }
    Ok(())
}

/// Validate a required email address (non-empty, one `@` with text on both sides).
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let valid = value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'));
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid email address: {value}"),
        )
        .for_field("email"));
    }
    Ok(())
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Validate a strictly positive money value.
pub fn validate_positive_amount(value: f64, field: &str, code: ErrorCode) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::with_message(code, format!("{field} must be greater than 0"))
            .for_field(field));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::with_message(
            code,
            format!("{field} exceeds maximum allowed ({MAX_AMOUNT})"),
        )
        .for_field(field));
    }
    Ok(())
}

/// Validate a money value that may be zero (prices, discounts).
pub fn validate_non_negative_amount(
    value: f64,
    field: &str,
    code: ErrorCode,
) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(code, format!("{field} must not be negative"))
            .for_field(field));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::with_message(
            code,
            format!("{field} exceeds maximum allowed ({MAX_AMOUNT})"),
        )
        .for_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Alice", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "phone", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("98000".into()), "phone", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("9".repeat(101)), "phone", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ram@example.com").is_ok());
        assert_eq!(validate_email("ram.example.com").unwrap_err().code, ErrorCode::InvalidFormat);
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ram@").is_err());
        assert_eq!(validate_email("").unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_amounts() {
        let code = ErrorCode::PaymentInvalidAmount;
        assert!(validate_positive_amount(10.0, "amount", code).is_ok());
        assert_eq!(validate_positive_amount(0.0, "amount", code).unwrap_err().code, code);
        assert!(validate_positive_amount(-1.0, "amount", code).is_err());
        assert!(validate_positive_amount(f64::NAN, "amount", code).is_err());
        assert!(validate_non_negative_amount(0.0, "discount", code).is_ok());
        assert!(validate_non_negative_amount(-0.5, "discount", code).is_err());
    }
}
