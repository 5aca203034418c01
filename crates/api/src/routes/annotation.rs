//! Route definitions for the `/annotations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Routes mounted at `/annotations`.
///
/// ```text
/// GET        /{id}  -> get_by_id
/// PATCH, PUT /{id}  -> update
/// DELETE     /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(annotation::get_by_id)
            .patch(annotation::update)
            .put(annotation::update)
            .delete(annotation::delete),
    )
}
