//! Photo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use paintsnap_core::types::{DbId, Timestamp};

/// A row from the `photos` table.
///
/// `storage_key` is the image reference: a path relative to the image
/// store root.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub area_id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub storage_key: String,
    pub content_type: String,
    pub file_size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Photo {
    /// Pixel dimensions, when they were readable at upload time.
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        self.width.zip(self.height)
    }
}

/// DTO for inserting a photo after its bytes are stored.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub area_id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub storage_key: String,
    pub content_type: String,
    pub file_size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// DTO for updating a photo. Moving to another area is done via `area_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub name: Option<String>,
    pub area_id: Option<DbId>,
}
