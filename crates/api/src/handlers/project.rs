//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use paintsnap_core::error::CoreError;
use paintsnap_core::types::DbId;
use paintsnap_core::validation::{
    validate_name, validate_optional_text, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use paintsnap_db::models::project::{CreateProject, Project, UpdateProject};
use paintsnap_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let input = CreateProject {
        name: validate_name("name", &input.name, MAX_NAME_LENGTH)?,
        description: validate_optional_text(
            "description",
            input.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?,
    };
    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = auth.user_id, project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let input = UpdateProject {
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
    let project = ProjectRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user_id, project_id = id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/projects/{id}
///
/// Cascades to areas, photos and annotations, then removes the image files.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let keys = ProjectRepo::delete(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    storage::delete_all(state.images.as_ref(), &keys).await;
    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        photos_removed = keys.len(),
        "Project deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
