//! Area entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use paintsnap_core::types::{DbId, Timestamp};

/// A row from the `areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Area {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Area row joined with its photo count, used by project-scoped listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AreaWithCount {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub photo_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new area. The project comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArea {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing area. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArea {
    pub name: Option<String>,
    pub description: Option<String>,
}
