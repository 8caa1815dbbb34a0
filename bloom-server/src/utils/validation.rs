//! Input validation helpers
//!
//! Centralized text length constants and validation functions. SurrealDB
//! does not enforce string lengths, so every write path goes through these.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, banner, page titles, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Free text: order comments, descriptions
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, color, slug
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Checkout field minimums ─────────────────────────────────────────

/// Customer name must carry at least this many characters
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;

/// Phone must carry at least this many characters
pub const MIN_PHONE_LEN: usize = 10;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
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
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate that a required string meets a minimum length (after trimming).
pub fn validate_min_len(value: &str, field: &str, min_len: usize) -> Result<(), AppError> {
    if value.trim().chars().count() < min_len {
        return Err(AppError::validation(format!(
            "{field} must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Shallow email shape check: one `@`, non-empty local part, dot in domain.
///
/// Full RFC validation is the mail relay's problem; this catches obvious
/// typos before an order row is written.
pub fn validate_email_format(value: &str, field: &str) -> Result<(), AppError> {
    let valid = value.len() <= MAX_EMAIL_LEN
        && value.split('@').count() == 2
        && value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a URL-safe slug: lowercase alphanumerics and hyphens only.
pub fn validate_slug(value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.len() > MAX_SHORT_TEXT_LEN {
        return Err(AppError::validation("slug must be 1-100 characters"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::validation(
            "slug may only contain lowercase letters, digits and hyphens",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("Tulip", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn email_format_catches_obvious_garbage() {
        assert!(validate_email_format("ivan@example.com", "email").is_ok());
        assert!(validate_email_format("ivan@example", "email").is_err());
        assert!(validate_email_format("@example.com", "email").is_err());
        assert!(validate_email_format("not-an-email", "email").is_err());
    }

    #[test]
    fn min_len_counts_chars_not_bytes() {
        // Cyrillic name: 2 chars, 4 bytes
        assert!(validate_min_len("Ян", "customerName", MIN_CUSTOMER_NAME_LEN).is_ok());
        assert!(validate_min_len("Я", "customerName", MIN_CUSTOMER_NAME_LEN).is_err());
    }

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(validate_slug("tulip-red-princess").is_ok());
        assert!(validate_slug("Tulip").is_err());
        assert!(validate_slug("tulip red").is_err());
        assert!(validate_slug("").is_err());
    }
}
