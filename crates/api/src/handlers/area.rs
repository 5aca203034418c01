//! Handlers for areas, both project-scoped (`/projects/{project_id}/areas`)
//! and by id (`/areas/{id}`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use paintsnap_core::error::CoreError;
use paintsnap_core::types::DbId;
use paintsnap_core::validation::{
    validate_name, validate_optional_text, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use paintsnap_db::models::area::{Area, AreaWithCount, CreateArea, UpdateArea};
use paintsnap_db::repositories::{AreaRepo, PhotoRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::photo::PhotoResponse;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Area", id })
}

/// Ensure the project exists and belongs to the caller.
async fn ensure_project_owned(state: &AppState, project_id: DbId, user_id: DbId) -> AppResult<()> {
    ProjectRepo::find_owned(&state.pool, project_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(())
}

/// GET /api/projects/{project_id}/areas
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AreaWithCount>>>> {
    ensure_project_owned(&state, project_id, auth.user_id).await?;
    let areas = AreaRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: areas }))
}

/// POST /api/projects/{project_id}/areas
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateArea>,
) -> AppResult<(StatusCode, Json<DataResponse<Area>>)> {
    ensure_project_owned(&state, project_id, auth.user_id).await?;
    let input = CreateArea {
        name: validate_name("name", &input.name, MAX_NAME_LENGTH)?,
        description: validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?,
    };
    let area = AreaRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(user_id = auth.user_id, project_id, area_id = area.id, "Area created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: area })))
}

/// GET /api/areas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Area>>> {
    let area = AreaRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: area }))
}

/// PATCH /api/areas/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArea>,
) -> AppResult<Json<DataResponse<Area>>> {
    let input = UpdateArea {
        name: input
            .name
            .as_deref()
            .map(|n| validate_name("name", n, MAX_NAME_LENGTH))
            .transpose()?,
        description: validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?,
    };
    let area = AreaRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user_id, area_id = id, "Area updated");
    Ok(Json(DataResponse { data: area }))
}

/// DELETE /api/areas/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let keys = AreaRepo::delete(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    storage::delete_all(state.images.as_ref(), &keys).await;
    tracing::info!(
        user_id = auth.user_id,
        area_id = id,
        photos_removed = keys.len(),
        "Area deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/areas/{id}/photos
pub async fn list_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<PhotoResponse>>>> {
    AreaRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let (limit, offset) = params.clamped();
    let photos = PhotoRepo::list_owned(&state.pool, auth.user_id, Some(id), limit, offset).await?;
    Ok(Json(DataResponse {
        data: photos.into_iter().map(PhotoResponse::from).collect(),
    }))
}
