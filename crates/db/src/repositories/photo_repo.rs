//! Repository for the `photos` table.

use sqlx::PgPool;
use paintsnap_core::types::DbId;

use crate::models::photo::{CreatePhoto, Photo, UpdatePhoto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, area_id, owner_id, name, storage_key, content_type, \
                        file_size_bytes, width, height, created_at, updated_at";

/// Ownership predicate: the photo's area sits in a project owned by `$2`.
const OWNED: &str = "area_id IN (
    SELECT a.id FROM areas a JOIN projects pr ON pr.id = a.project_id WHERE pr.owner_id = $2
)";

/// Provides CRUD operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos
                (area_id, owner_id, name, storage_key, content_type, file_size_bytes, width, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.area_id)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.storage_key)
            .bind(&input.content_type)
            .bind(input.file_size_bytes)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    /// Find a photo by ID if it belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1 AND {OWNED}");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's photos, newest first, optionally restricted to one area.
    pub async fn list_owned(
        pool: &PgPool,
        owner_id: DbId,
        area_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos
             WHERE owner_id = $2 AND {OWNED}
               AND ($1::BIGINT IS NULL OR area_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(area_id)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a photo's name and/or area.
    ///
    /// Returns `None` if no row with the given `id` is owned by `owner_id`.
    /// The caller checks that a new `area_id` is also owned.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                name = COALESCE($3, name),
                area_id = COALESCE($4, area_id)
             WHERE id = $1 AND {OWNED}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.area_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a photo (annotations cascade). Returns the removed storage key.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!("DELETE FROM photos WHERE id = $1 AND {OWNED} RETURNING storage_key");
        let row: Option<(String,)> = sqlx::query_as(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(key,)| key))
    }
}
