//! Handlers for the `/support` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use paintsnap_core::validation::{validate_name, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use paintsnap_db::models::support::{CreateSupportRequest, SupportRequest};
use paintsnap_db::repositories::SupportRequestRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/support
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateSupportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SupportRequest>>)> {
    let input = CreateSupportRequest {
        subject: validate_name("subject", &input.subject, MAX_NAME_LENGTH)?,
        message: validate_name("message", &input.message, MAX_DESCRIPTION_LENGTH)?,
    };
    let request = SupportRequestRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = auth.user_id, support_request_id = request.id, "Support request filed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/support
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SupportRequest>>>> {
    let requests = SupportRequestRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}
