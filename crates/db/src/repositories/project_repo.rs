//! Repository for the `projects` table.

use sqlx::PgPool;
use paintsnap_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID if it belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects ordered by most recently created first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` is owned by `owner_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and, via cascade, its areas, photos, and annotations.
    ///
    /// Returns the storage keys of the photos that were removed so the caller
    /// can delete the image files, or `None` if the project was not found.
    ///
    /// The project and its areas are locked first, which blocks new areas
    /// and new photos from landing under the project until the delete
    /// commits.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 AND owner_id = $2 FOR UPDATE")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("SELECT id FROM areas WHERE project_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let keys: Vec<(String,)> = sqlx::query_as(
            "SELECT p.storage_key
             FROM photos p
             JOIN areas a ON a.id = p.area_id
             WHERE a.project_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(keys.into_iter().map(|(k,)| k).collect()))
    }
}
