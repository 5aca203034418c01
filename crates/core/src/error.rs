use crate::auth_errors::AuthErrorCode;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An authentication failure with a well-known client-facing code.
    #[error("Authentication failed: {}", .0.code())]
    Auth(AuthErrorCode),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthErrorCode> for CoreError {
    fn from(code: AuthErrorCode) -> Self {
        CoreError::Auth(code)
    }
}
