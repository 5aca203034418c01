//! Handlers for the `/photos` resource: multipart upload, listing,
//! metadata edits, deletion and image download.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paintsnap_core::error::CoreError;
use paintsnap_core::types::DbId;
use paintsnap_core::upload::{display_name_from_filename, storage_key, validate_image_upload};
use paintsnap_core::validation::{validate_name, MAX_NAME_LENGTH};
use paintsnap_db::models::photo::{CreatePhoto, Photo, UpdatePhoto};
use paintsnap_db::repositories::{AreaRepo, PhotoRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PhotoListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::metadata::read_dimensions;
use crate::storage::StorageError;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A photo row plus the URL its image bytes are served from.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    #[serde(flatten)]
    pub photo: Photo,
    pub image_url: String,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        let image_url = format!("/api/photos/{}/image", photo.id);
        Self { photo, image_url }
    }
}

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Photo", id })
}

fn area_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Area", id })
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Parts collected from an upload form.
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    area_id: Option<String>,
    name: Option<String>,
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            Some("area_id") => form.area_id = Some(field.text().await?),
            Some("name") => form.name = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

/// POST /api/photos
///
/// Multipart form: `file` (required), `area_id` (required), `name` (optional,
/// defaults to the file's stem).
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<PhotoResponse>>)> {
    let form = read_upload_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| CoreError::Validation("file is required".into()))?;
    let area_id: DbId = form
        .area_id
        .as_deref()
        .ok_or_else(|| CoreError::Validation("area_id is required".into()))?
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation("area_id must be an integer".into()))?;

    let kind = validate_image_upload(
        &file.filename,
        file.content_type.as_deref(),
        file.bytes.len(),
        state.config.max_upload_bytes,
    )?;

    let name = match form.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => validate_name("name", name, MAX_NAME_LENGTH)?,
        _ => display_name_from_filename(&file.filename)
            .chars()
            .take(MAX_NAME_LENGTH)
            .collect(),
    };

    AreaRepo::find_owned(&state.pool, area_id, auth.user_id)
        .await?
        .ok_or_else(|| area_not_found(area_id))?;

    let dimensions = read_dimensions(&file.bytes);
    if dimensions.is_none() {
        tracing::debug!(filename = %file.filename, "Could not read image dimensions");
    }

    let key = storage_key(auth.user_id, kind.extension);
    state.images.put(&key, &file.bytes).await?;

    let input = CreatePhoto {
        area_id,
        owner_id: auth.user_id,
        name,
        storage_key: key.clone(),
        content_type: kind.content_type.to_string(),
        file_size_bytes: file.bytes.len() as i64,
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
    };

    let photo = match PhotoRepo::create(&state.pool, &input).await {
        Ok(photo) => photo,
        Err(e) => {
            // Do not leave an orphaned file behind.
            if let Err(cleanup) = state.images.delete(&key).await {
                tracing::warn!(storage_key = %key, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        photo_id = photo.id,
        area_id,
        size = photo.file_size_bytes,
        "Photo uploaded"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PhotoResponse::from(photo),
        }),
    ))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/photos?area_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PhotoListParams>,
) -> AppResult<Json<DataResponse<Vec<PhotoResponse>>>> {
    let (limit, offset) = params.page().clamped();
    let photos =
        PhotoRepo::list_owned(&state.pool, auth.user_id, params.area_id, limit, offset).await?;
    Ok(Json(DataResponse {
        data: photos.into_iter().map(PhotoResponse::from).collect(),
    }))
}

/// GET /api/photos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PhotoResponse>>> {
    let photo = PhotoRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: PhotoResponse::from(photo),
    }))
}

/// PATCH /api/photos/{id}
///
/// Rename and/or move to another area owned by the same user.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<DataResponse<PhotoResponse>>> {
    if let Some(area_id) = input.area_id {
        AreaRepo::find_owned(&state.pool, area_id, auth.user_id)
            .await?
            .ok_or_else(|| area_not_found(area_id))?;
    }
    let input = UpdatePhoto {
        name: input
            .name
            .as_deref()
            .map(|n| validate_name("name", n, MAX_NAME_LENGTH))
            .transpose()?,
        area_id: input.area_id,
    };
    let photo = PhotoRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user_id, photo_id = id, "Photo updated");
    Ok(Json(DataResponse {
        data: PhotoResponse::from(photo),
    }))
}

/// DELETE /api/photos/{id}
///
/// Removes the row (annotations cascade) and then the stored image.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let key = PhotoRepo::delete(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Err(e) = state.images.delete(&key).await {
        tracing::warn!(photo_id = id, storage_key = %key, error = %e, "Failed to remove stored image");
    }
    tracing::info!(user_id = auth.user_id, photo_id = id, "Photo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/photos/{id}/image
///
/// Serves the stored bytes with the content type recorded at upload.
pub async fn image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let photo = PhotoRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let bytes = match state.images.get(&photo.storage_key).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(key)) => {
            tracing::error!(photo_id = id, storage_key = %key, "Image file missing from store");
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Image",
                id,
            }));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        [
            (CONTENT_TYPE, photo.content_type),
            (CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        bytes,
    )
        .into_response())
}
