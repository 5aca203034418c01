//! Annotation model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use paintsnap_core::types::{DbId, Timestamp};

/// A row from the `annotations` table. Positions are percent (0-100).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Annotation {
    pub id: DbId,
    pub photo_id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "x")]
    pub pos_x: f64,
    #[serde(rename = "y")]
    pub pos_y: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting an annotation.
#[derive(Debug, Clone)]
pub struct CreateAnnotation {
    pub title: String,
    pub content: String,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// Validated values for updating an annotation. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateAnnotation {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}
