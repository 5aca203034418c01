//! Handlers for the signed-in user's own profile (`/me`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use paintsnap_core::auth_errors::AuthErrorCode;
use paintsnap_core::validation::{
    validate_email, validate_new_password, validate_optional_text, MAX_DISPLAY_NAME_LENGTH,
};
use paintsnap_db::models::user::{UpdateUserProfile, UserProfile};
use paintsnap_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::handlers::auth::{ensure_not_locked, record_failed_password};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// GET /api/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::from(AuthErrorCode::UserNotFound))?;
    Ok(Json(DataResponse {
        data: UserProfile::from(user),
    }))
}

/// PATCH /api/me
///
/// Update display name and/or email. Omitted or blank fields are left as is.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let normalized = UpdateUserProfile {
        email: input.email.as_deref().map(validate_email).transpose()?,
        display_name: validate_optional_text(
            "display_name",
            input.display_name.as_deref(),
            MAX_DISPLAY_NAME_LENGTH,
        )?,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &normalized)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_users_email") {
                AppError::from(AuthErrorCode::EmailAlreadyInUse)
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or(AppError::from(AuthErrorCode::UserNotFound))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(DataResponse {
        data: UserProfile::from(user),
    }))
}

/// POST /api/me/password
///
/// Change the password after re-checking the current one. Every session is
/// revoked, so other devices must sign in again. Returns 204 No Content.
///
/// A wrong current password counts towards the same lockout as sign-in.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::from(AuthErrorCode::UserNotFound))?;
    ensure_not_locked(&user)?;

    let current_ok = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        record_failed_password(&state, user.id).await?;
        return Err(AuthErrorCode::RequiresRecentLogin.into());
    }

    validate_new_password(
        &input.new_password,
        &input.confirm_password,
        state.config.min_password_length,
    )?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Password changed, sessions revoked");
    Ok(StatusCode::NO_CONTENT)
}
