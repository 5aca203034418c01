//! Repository for the `support_requests` table.

use sqlx::PgPool;
use paintsnap_core::types::DbId;

use crate::models::support::{CreateSupportRequest, SupportRequest};

const COLUMNS: &str = "id, user_id, subject, message, status, created_at, updated_at";

/// Provides insert and listing for support requests.
pub struct SupportRequestRepo;

impl SupportRequestRepo {
    /// File a new support request. Status starts as `open`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSupportRequest,
    ) -> Result<SupportRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_requests (user_id, subject, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportRequest>(&query)
            .bind(user_id)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List a user's support requests, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SupportRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_requests
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SupportRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
