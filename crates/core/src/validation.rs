//! Form-level validation shared by every create/update endpoint.
//!
//! Plain records carry no invariants beyond what is checked here: required
//! names, bounded free text, well-formed email, and password length plus
//! confirmation match.

use validator::ValidateEmail;

use crate::auth_errors::AuthErrorCode;
use crate::error::CoreError;

/// Maximum length of project, area, and photo names.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length of project and area descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length of a user's display name.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 80;

/// Default minimum password length when not configured.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Upper bound on password length so hashing cost stays bounded.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a required name field and return it trimmed.
pub fn validate_name(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional free-text field. Blank input is normalized to `None`.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, CoreError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Validate an email address and return it trimmed and lowercased.
pub fn validate_email(value: &str) -> Result<String, CoreError> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() || !normalized.validate_email() {
        return Err(AuthErrorCode::InvalidEmail.into());
    }
    Ok(normalized)
}

/// Validate a new password against its confirmation.
///
/// Length is checked before the match so a short password reports
/// `auth/weak-password` even when the confirmation also differs.
pub fn validate_new_password(
    password: &str,
    confirm: &str,
    min_len: usize,
) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < min_len || len > MAX_PASSWORD_LENGTH {
        return Err(AuthErrorCode::WeakPassword.into());
    }
    if password != confirm {
        return Err(AuthErrorCode::PasswordMismatch.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("name", "  Kitchen  ", 20).unwrap(), "Kitchen");
    }

    #[test]
    fn blank_name_rejected() {
        let err = validate_name("name", "   ", 20).unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn long_name_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_matches!(
            validate_name("name", &long, MAX_NAME_LENGTH),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn name_length_counts_chars_not_bytes() {
        let accented = "é".repeat(MAX_NAME_LENGTH);
        assert!(validate_name("name", &accented, MAX_NAME_LENGTH).is_ok());
    }

    #[test]
    fn optional_text_blank_becomes_none() {
        assert_eq!(validate_optional_text("d", Some("  "), 10).unwrap(), None);
        assert_eq!(validate_optional_text("d", None, 10).unwrap(), None);
        assert_eq!(
            validate_optional_text("d", Some(" hi "), 10).unwrap(),
            Some("hi".to_string())
        );
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            validate_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn malformed_email_rejected() {
        for bad in ["", "plainaddress", "@no-local.com", "two@@example.com"] {
            assert_matches!(
                validate_email(bad),
                Err(CoreError::Auth(AuthErrorCode::InvalidEmail)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn short_password_is_weak() {
        assert_matches!(
            validate_new_password("short", "other", 8),
            Err(CoreError::Auth(AuthErrorCode::WeakPassword))
        );
    }

    #[test]
    fn mismatched_confirmation_rejected() {
        assert_matches!(
            validate_new_password("long-enough", "long-enougj", 8),
            Err(CoreError::Auth(AuthErrorCode::PasswordMismatch))
        );
    }

    #[test]
    fn matching_password_at_minimum_accepted() {
        assert!(validate_new_password("12345678", "12345678", 8).is_ok());
    }
}
