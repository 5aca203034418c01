pub mod annotation;
pub mod area;
pub mod auth;
pub mod health;
pub mod photo;
pub mod profile;
pub mod project;
pub mod support;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          sign up (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout
///
/// /me                                   get, update own profile
/// /me/password                          change password (POST)
///
/// /projects                             list, create
/// /projects/{id}                        get, update, delete
/// /projects/{project_id}/areas          list, create
///
/// /areas/{id}                           get, update, delete
/// /areas/{id}/photos                    list photos in area
///
/// /photos                               list (?area_id, ?limit, ?offset), upload (multipart)
/// /photos/{id}                          get, update, delete
/// /photos/{id}/image                    image bytes
/// /photos/{id}/annotations              list, create
///
/// /annotations/{id}                     get, update, delete
///
/// /support                              list own, create
/// ```
///
/// Updates accept both `PATCH` and `PUT`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // The signed-in user's own profile.
        .nest("/me", profile::router())
        // Projects, with project-scoped areas.
        .nest("/projects", project::router())
        .nest("/areas", area::router())
        .nest("/photos", photo::router())
        .nest("/annotations", annotation::router())
        .nest("/support", support::router())
}
