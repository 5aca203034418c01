//! Route definitions for the `/me` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET        /          -> get_me
/// PATCH, PUT /          -> update_me
/// POST       /password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(profile::get_me)
                .patch(profile::update_me)
                .put(profile::update_me),
        )
        .route("/password", post(profile::change_password))
}
