//! Handlers for annotations, both photo-scoped (`/photos/{id}/annotations`)
//! and by id (`/annotations/{id}`).
//!
//! Positions are stored in percent. Requests may send `x`/`y` (percent) or
//! `px`/`py` (pixels on the original image); responses always carry `x`/`y`
//! and, when the photo's size is known, the equivalent `px`/`py`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use paintsnap_core::annotation::{
    to_pixels, validate_content, validate_title, MarkerFields, Position,
};
use paintsnap_core::error::CoreError;
use paintsnap_core::types::DbId;
use paintsnap_db::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};
use paintsnap_db::models::photo::Photo;
use paintsnap_db::repositories::{AnnotationRepo, PhotoRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::photo;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /photos/{id}/annotations`.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub marker: MarkerFields,
}

/// Request body for `PATCH /annotations/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnotationRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(flatten)]
    pub marker: MarkerFields,
}

/// An annotation with its marker also expressed in photo pixels.
#[derive(Debug, Serialize)]
pub struct AnnotationResponse {
    #[serde(flatten)]
    pub annotation: Annotation,
    pub px: Option<f64>,
    pub py: Option<f64>,
}

impl AnnotationResponse {
    fn new(annotation: Annotation, dimensions: Option<(i32, i32)>) -> Self {
        let pixels = dimensions.map(|(w, h)| {
            let position = Position {
                x: annotation.pos_x,
                y: annotation.pos_y,
            };
            to_pixels(position, f64::from(w), f64::from(h))
        });
        Self {
            annotation,
            px: pixels.map(|(px, _)| px),
            py: pixels.map(|(_, py)| py),
        }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Annotation",
        id,
    })
}

async fn find_photo(state: &AppState, photo_id: DbId, user_id: DbId) -> AppResult<Photo> {
    PhotoRepo::find_owned(&state.pool, photo_id, user_id)
        .await?
        .ok_or_else(|| photo::not_found(photo_id))
}

// ---------------------------------------------------------------------------
// Photo-scoped handlers
// ---------------------------------------------------------------------------

/// GET /api/photos/{id}/annotations
pub async fn list_by_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(photo_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AnnotationResponse>>>> {
    let photo = find_photo(&state, photo_id, auth.user_id).await?;
    let annotations = AnnotationRepo::list_by_photo(&state.pool, photo.id).await?;
    let dimensions = photo.dimensions();
    Ok(Json(DataResponse {
        data: annotations
            .into_iter()
            .map(|a| AnnotationResponse::new(a, dimensions))
            .collect(),
    }))
}

/// POST /api/photos/{id}/annotations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(photo_id): Path<DbId>,
    Json(input): Json<CreateAnnotationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AnnotationResponse>>)> {
    let photo = find_photo(&state, photo_id, auth.user_id).await?;
    let dimensions = photo.dimensions();

    let position = input.marker.resolve(dimensions)?;
    let create = CreateAnnotation {
        title: validate_title(&input.title)?,
        content: validate_content(&input.content)?,
        pos_x: position.x,
        pos_y: position.y,
    };

    let annotation = AnnotationRepo::create(&state.pool, photo.id, auth.user_id, &create).await?;
    tracing::info!(
        user_id = auth.user_id,
        photo_id,
        annotation_id = annotation.id,
        x = annotation.pos_x,
        y = annotation.pos_y,
        "Annotation created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AnnotationResponse::new(annotation, dimensions),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Annotation-by-id handlers
// ---------------------------------------------------------------------------

/// GET /api/annotations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AnnotationResponse>>> {
    let annotation = AnnotationRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let photo = find_photo(&state, annotation.photo_id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: AnnotationResponse::new(annotation, photo.dimensions()),
    }))
}

/// PATCH /api/annotations/{id}
///
/// Any subset of title, content and position may be sent.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnotationRequest>,
) -> AppResult<Json<DataResponse<AnnotationResponse>>> {
    let existing = AnnotationRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let photo = find_photo(&state, existing.photo_id, auth.user_id).await?;
    let dimensions = photo.dimensions();

    let (pos_x, pos_y) = input.marker.resolve_partial(dimensions)?;
    let update = UpdateAnnotation {
        title: input.title.as_deref().map(validate_title).transpose()?,
        content: input.content.as_deref().map(validate_content).transpose()?,
        pos_x,
        pos_y,
    };

    let annotation = AnnotationRepo::update(&state.pool, id, auth.user_id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user_id, annotation_id = id, "Annotation updated");
    Ok(Json(DataResponse {
        data: AnnotationResponse::new(annotation, dimensions),
    }))
}

/// DELETE /api/annotations/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AnnotationRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user_id, annotation_id = id, "Annotation deleted");
    Ok(StatusCode::NO_CONTENT)
}
