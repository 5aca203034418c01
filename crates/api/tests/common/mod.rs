#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{ImageFormat, RgbImage};
use serde_json::{json, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use paintsnap_api::auth::jwt::JwtConfig;
use paintsnap_api::config::ServerConfig;
use paintsnap_api::router::build_app_router;
use paintsnap_api::state::AppState;
use paintsnap_api::storage::LocalImageStore;

/// Password used by [`signup`].
pub const TEST_PASSWORD: &str = "wet-paint-123";

/// Upload limit used by [`test_config`].
pub const TEST_MAX_UPLOAD_BYTES: usize = 256 * 1024;

const BOUNDARY: &str = "paintsnap-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The router under test plus the temporary image store backing it.
pub struct TestApp {
    pub router: Router,
    pub storage: TempDir,
}

impl TestApp {
    /// A fresh handle on the router (`oneshot` consumes it).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Whether a file exists in the image store under `key`.
    pub fn stored(&self, key: &str) -> bool {
        self.storage.path().join(key).is_file()
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a throwaway image store directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let storage = tempfile::tempdir().expect("tempdir should be created");
    let config = test_config(storage.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(LocalImageStore::new(storage.path())),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// A file part for [`post_multipart_auth`].
pub struct FilePart<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encode text fields and an optional `file` part as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(app: Router, uri: &str, token: &str, body: Vec<u8>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Encode a blank PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .expect("png should encode");
    out.into_inner()
}

/// Tokens and id of a freshly signed-up user.
pub struct TestUser {
    pub id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign up `email` with [`TEST_PASSWORD`] through the API.
pub async fn signup(app: Router, email: &str) -> TestUser {
    let body = json!({
        "email": email,
        "password": TEST_PASSWORD,
        "confirm_password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["user"]["id"].as_i64().expect("user id"),
        access_token: json["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string(),
        refresh_token: json["data"]["refresh_token"]
            .as_str()
            .expect("refresh token")
            .to_string(),
    }
}

/// Create a project and one area in it, returning `(project_id, area_id)`.
pub async fn create_project_with_area(app: &TestApp, token: &str) -> (i64, i64) {
    let response = post_json_auth(
        app.app(),
        "/api/projects",
        token,
        json!({ "name": "Victorian terrace" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.app(),
        &format!("/api/projects/{project_id}/areas"),
        token,
        json!({ "name": "Hallway" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let area_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    (project_id, area_id)
}

/// Upload a PNG of the given size into `area_id`, returning the photo JSON.
pub async fn upload_png(app: &TestApp, token: &str, area_id: i64, width: u32, height: u32) -> Value {
    let png = png_bytes(width, height);
    let area = area_id.to_string();
    let body = multipart_body(
        &[("area_id", area.as_str())],
        Some(FilePart {
            filename: "hall wall.png",
            content_type: "image/png",
            bytes: &png,
        }),
    );
    let response = post_multipart_auth(app.app(), "/api/photos", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
