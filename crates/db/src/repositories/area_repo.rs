//! Repository for the `areas` table.

use sqlx::PgPool;
use paintsnap_core::types::DbId;

use crate::models::area::{Area, AreaWithCount, CreateArea, UpdateArea};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, created_at, updated_at";

/// Provides CRUD operations for areas.
pub struct AreaRepo;

impl AreaRepo {
    /// Insert a new area under `project_id`, returning the created row.
    ///
    /// Area names are unique per project (`uq_areas_project_id_name`).
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateArea,
    ) -> Result<Area, sqlx::Error> {
        let query = format!(
            "INSERT INTO areas (project_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find an area by ID if its project belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Area>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM areas
             WHERE id = $1
               AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all areas in a project with their photo counts, ordered by name.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<AreaWithCount>, sqlx::Error> {
        sqlx::query_as::<_, AreaWithCount>(
            "SELECT a.id, a.project_id, a.name, a.description,
                    COUNT(p.id) AS photo_count,
                    a.created_at, a.updated_at
             FROM areas a
             LEFT JOIN photos p ON p.area_id = a.id
             WHERE a.project_id = $1
             GROUP BY a.id
             ORDER BY a.name ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Update an area. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` is owned by `owner_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateArea,
    ) -> Result<Option<Area>, sqlx::Error> {
        let query = format!(
            "UPDATE areas SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1
               AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an area and, via cascade, its photos and annotations.
    ///
    /// Returns the storage keys of the removed photos, or `None` if the area
    /// was not found.
    ///
    /// The area row is locked before its photos are read. A concurrent
    /// insert or move into this area waits on that lock and then fails its
    /// foreign-key check, so every cascaded photo has its key returned.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM areas
             WHERE id = $1
               AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
             FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let keys: Vec<(String,)> =
            sqlx::query_as("SELECT storage_key FROM photos WHERE area_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(keys.into_iter().map(|(k,)| k).collect()))
    }
}
