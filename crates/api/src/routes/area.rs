//! Route definitions for the `/areas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::area;
use crate::state::AppState;

/// Routes mounted at `/areas`.
///
/// ```text
/// GET        /{id}         -> get_by_id
/// PATCH, PUT /{id}         -> update
/// DELETE     /{id}         -> delete
/// GET        /{id}/photos  -> list_photos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(area::get_by_id)
                .patch(area::update)
                .put(area::update)
                .delete(area::delete),
        )
        .route("/{id}/photos", get(area::list_photos))
}
