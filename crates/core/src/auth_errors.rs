//! Well-known authentication error codes and their user-facing text.
//!
//! Every auth failure the API reports carries one of these codes in the
//! `code` field of the error body, alongside the friendly message from this
//! table in the `error` field. Clients can show the message verbatim or key
//! their own copy off the code.

use serde::Serialize;

/// Fallback text for codes that are not in the table.
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong. Please try again.";

/// Authentication failure categories with stable string codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    PasswordMismatch,
    UserNotFound,
    WrongPassword,
    UserDisabled,
    TooManyRequests,
    InvalidToken,
    RequiresRecentLogin,
}

/// Every code in declaration order.
pub const ALL_AUTH_ERROR_CODES: &[AuthErrorCode] = &[
    AuthErrorCode::EmailAlreadyInUse,
    AuthErrorCode::InvalidEmail,
    AuthErrorCode::WeakPassword,
    AuthErrorCode::PasswordMismatch,
    AuthErrorCode::UserNotFound,
    AuthErrorCode::WrongPassword,
    AuthErrorCode::UserDisabled,
    AuthErrorCode::TooManyRequests,
    AuthErrorCode::InvalidToken,
    AuthErrorCode::RequiresRecentLogin,
];

impl AuthErrorCode {
    /// The stable wire code, e.g. `auth/wrong-password`.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::InvalidEmail => "auth/invalid-email",
            Self::WeakPassword => "auth/weak-password",
            Self::PasswordMismatch => "auth/password-mismatch",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserDisabled => "auth/user-disabled",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::InvalidToken => "auth/invalid-token",
            Self::RequiresRecentLogin => "auth/requires-recent-login",
        }
    }

    /// Friendly text suitable for showing in a notification.
    pub fn friendly_message(self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "An account with this email already exists.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::WeakPassword => "Password is too short.",
            Self::PasswordMismatch => "Passwords do not match.",
            Self::UserNotFound => "No account was found for this user.",
            Self::WrongPassword => "Incorrect email or password.",
            Self::UserDisabled => "This account has been disabled.",
            Self::TooManyRequests => {
                "Too many failed attempts. Please wait a few minutes and try again."
            }
            Self::InvalidToken => "Your session has expired. Please sign in again.",
            Self::RequiresRecentLogin => "Please confirm your current password to continue.",
        }
    }

    /// Parse a wire code back into a variant. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_AUTH_ERROR_CODES
            .iter()
            .copied()
            .find(|c| c.code() == code)
    }
}

impl From<AuthErrorCode> for &'static str {
    fn from(code: AuthErrorCode) -> Self {
        code.code()
    }
}

/// Look up the friendly text for an arbitrary code string.
///
/// Unknown codes fall back to [`GENERIC_AUTH_MESSAGE`].
pub fn friendly_message_for(code: &str) -> &'static str {
    AuthErrorCode::from_code(code)
        .map(AuthErrorCode::friendly_message)
        .unwrap_or(GENERIC_AUTH_MESSAGE)
}
