//! Route definitions for the `/support` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`.
///
/// ```text
/// GET  /  -> list
/// POST /  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(support::list).post(support::create))
}
