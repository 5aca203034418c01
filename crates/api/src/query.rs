//! Shared query parameter types for API handlers.

use paintsnap_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use paintsnap_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` ready to bind into a query.
    pub fn clamped(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            clamp_offset(self.offset),
        )
    }
}

/// Query parameters for `GET /photos`.
///
/// Fields are listed flat rather than flattening [`PaginationParams`]:
/// `serde(flatten)` loses the string-to-number coercion of query strings.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoListParams {
    pub area_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PhotoListParams {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
