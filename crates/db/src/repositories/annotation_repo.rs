//! Repository for the `annotations` table.

use sqlx::PgPool;
use paintsnap_core::types::DbId;

use crate::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};

/// Column list for annotation queries.
const COLUMNS: &str = "id, photo_id, author_id, title, content, pos_x, pos_y, \
    created_at, updated_at";

/// Ownership predicate: the annotation's photo sits under a project owned by `$2`.
const OWNED: &str = "photo_id IN (
    SELECT ph.id FROM photos ph
    JOIN areas a ON a.id = ph.area_id
    JOIN projects pr ON pr.id = a.project_id
    WHERE pr.owner_id = $2
)";

/// Provides CRUD operations for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Create a new annotation on a photo, returning the created row.
    pub async fn create(
        pool: &PgPool,
        photo_id: DbId,
        author_id: DbId,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (photo_id, author_id, title, content, pos_x, pos_y)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(photo_id)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_one(pool)
            .await
    }

    /// Find an annotation by ID if it belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1 AND {OWNED}");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all annotations on a photo in creation order.
    pub async fn list_by_photo(
        pool: &PgPool,
        photo_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE photo_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(photo_id)
            .fetch_all(pool)
            .await
    }

    /// Update an annotation's text and/or position.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                pos_x = COALESCE($5, pos_x),
                pos_y = COALESCE($6, pos_y)
             WHERE id = $1 AND {OWNED}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .fetch_optional(pool)
            .await
    }

    /// Delete an annotation by its ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM annotations WHERE id = $1 AND {OWNED}");
        let result = sqlx::query(&query)
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
