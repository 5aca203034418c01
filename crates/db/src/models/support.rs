//! Support request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use paintsnap_core::types::{DbId, Timestamp};

/// A row from the `support_requests` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SupportRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a support request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupportRequest {
    pub subject: String,
    pub message: String,
}
