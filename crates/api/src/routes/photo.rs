//! Route definitions for the `/photos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotation, photo};
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// GET        /                   -> list
/// POST       /                   -> upload (multipart)
/// GET        /{id}               -> get_by_id
/// PATCH, PUT /{id}               -> update
/// DELETE     /{id}               -> delete
/// GET        /{id}/image         -> image
/// GET        /{id}/annotations   -> annotation::list_by_photo
/// POST       /{id}/annotations   -> annotation::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photo::list).post(photo::upload))
        .route(
            "/{id}",
            get(photo::get_by_id)
                .patch(photo::update)
                .put(photo::update)
                .delete(photo::delete),
        )
        .route("/{id}/image", get(photo::image))
        .route(
            "/{id}/annotations",
            get(annotation::list_by_photo).post(annotation::create),
        )
}
