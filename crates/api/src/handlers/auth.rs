//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use paintsnap_core::auth_errors::AuthErrorCode;
use paintsnap_core::types::DbId;
use paintsnap_core::validation::{
    validate_email, validate_new_password, validate_optional_text, MAX_DISPLAY_NAME_LENGTH,
};
use paintsnap_db::models::session::CreateSession;
use paintsnap_db::models::user::{CreateUser, User, UserProfile};
use paintsnap_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
pub const LOCK_DURATION_MINS: i64 = 15;

/// Verified against when the email is unknown, so that branch pays the same
/// Argon2 cost as a wrong password.
static DUMMY_PASSWORD_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("paintsnap-unknown-user").ok());

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by signup, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Create an account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    let email = validate_email(&input.email)?;
    validate_new_password(
        &input.password,
        &input.confirm_password,
        state.config.min_password_length,
    )?;
    let display_name = validate_optional_text(
        "display_name",
        input.display_name.as_deref(),
        MAX_DISPLAY_NAME_LENGTH,
    )?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            display_name,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "uq_users_email") {
            AppError::from(AuthErrorCode::EmailAlreadyInUse)
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User signed up");

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let email = validate_email(&input.email)?;

    // 1. Find user by email.
    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        if let Some(hash) = DUMMY_PASSWORD_HASH.as_deref() {
            let _ = verify_password(&input.password, hash);
        }
        return Err(AuthErrorCode::WrongPassword.into());
    };

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AuthErrorCode::UserDisabled.into());
    }

    // 3. Check if the account is temporarily locked.
    ensure_not_locked(&user)?;

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock once the threshold is reached.
        record_failed_password(&state, user.id).await?;
        return Err(AuthErrorCode::WrongPassword.into());
    }

    // 6. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;
    SessionRepo::cleanup_for_user(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// refresh token is consumed and cannot be replayed.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::consume_refresh_token(&state.pool, &token_hash)
        .await?
        .ok_or(AppError::from(AuthErrorCode::InvalidToken))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or(AppError::from(AuthErrorCode::UserNotFound))?;

    if !user.is_active {
        return Err(AuthErrorCode::UserDisabled.into());
    }

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject with `auth/too-many-requests` while the account is locked.
pub(crate) fn ensure_not_locked(user: &User) -> AppResult<()> {
    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AuthErrorCode::TooManyRequests.into());
    }
    Ok(())
}

/// Count a wrong password against the user and lock the account once
/// [`MAX_FAILED_ATTEMPTS`] consecutive failures are reached.
pub(crate) async fn record_failed_password(state: &AppState, user_id: DbId) -> AppResult<()> {
    let failures = UserRepo::increment_failed_login(&state.pool, user_id).await?;
    if failures >= MAX_FAILED_ATTEMPTS {
        let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
        UserRepo::lock_account(&state.pool, user_id, lock_until).await?;
        tracing::warn!(user_id, failures, "Account locked after failed password attempts");
    }
    Ok(())
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserProfile::from(user),
    })
}
