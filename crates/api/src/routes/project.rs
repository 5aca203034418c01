//! Route definitions for the `/projects` resource.
//!
//! Also nests area routes under `/projects/{project_id}/areas`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{area, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET        /                        -> list
/// POST       /                        -> create
/// GET        /{id}                    -> get_by_id
/// PATCH, PUT /{id}                    -> update
/// DELETE     /{id}                    -> delete
///
/// GET        /{project_id}/areas      -> area::list_by_project
/// POST       /{project_id}/areas      -> area::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{project_id}/areas",
            get(area::list_by_project).post(area::create),
        )
}
