//! Integration tests for the repository layer against a real database.
//!
//! Covers:
//! - Full hierarchy (user -> project -> area -> photo -> annotation)
//! - Ownership scoping of every owner-aware lookup
//! - Cascade delete and returned storage keys
//! - Unique and check constraint violations
//! - Refresh-token single use

use chrono::{Duration, Utc};
use sqlx::PgPool;
use paintsnap_db::models::annotation::{CreateAnnotation, UpdateAnnotation};
use paintsnap_db::models::area::{CreateArea, UpdateArea};
use paintsnap_db::models::photo::{CreatePhoto, UpdatePhoto};
use paintsnap_db::models::project::{CreateProject, UpdateProject};
use paintsnap_db::models::session::CreateSession;
use paintsnap_db::models::support::CreateSupportRequest;
use paintsnap_db::models::user::{CreateUser, User};
use paintsnap_db::repositories::{
    AnnotationRepo, AreaRepo, PhotoRepo, ProjectRepo, SessionRepo, SupportRequestRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: None,
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Build user -> project -> area -> photo and return (user_id, area_id, photo_id).
async fn seed_photo(pool: &PgPool, email: &str, key: &str) -> (i64, i64, i64) {
    let user = new_user(pool, email).await;
    let project = ProjectRepo::create(
        pool,
        user.id,
        &CreateProject {
            name: "House".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let area = AreaRepo::create(
        pool,
        project.id,
        &CreateArea {
            name: "Kitchen".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let photo = PhotoRepo::create(
        pool,
        &CreatePhoto {
            area_id: area.id,
            owner_id: user.id,
            name: "North wall".to_string(),
            storage_key: key.to_string(),
            content_type: "image/png".to_string(),
            file_size_bytes: 1024,
            width: Some(800),
            height: Some(600),
        },
    )
    .await
    .unwrap();
    (user.id, area.id, photo.id)
}

fn marker(title: &str, x: f64, y: f64) -> CreateAnnotation {
    CreateAnnotation {
        title: title.to_string(),
        content: String::new(),
        pos_x: x,
        pos_y: y,
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    paintsnap_db::health_check(&pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique(pool: PgPool) {
    new_user(&pool, "dup@example.com").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "dup@example.com".to_string(),
            display_name: None,
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_login_counter(pool: PgPool) {
    let user = new_user(&pool, "count@example.com").await;
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.failed_login_count, 0);
    assert!(reloaded.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_login_counter_restarts_after_lock_expires(pool: PgPool) {
    let user = new_user(&pool, "expired-lock@example.com").await;
    for _ in 0..5 {
        UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    }
    UserRepo::lock_account(&pool, user.id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.locked_until.is_none());

    // An active lock keeps counting.
    UserRepo::lock_account(&pool, user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_token_consumed_once(pool: PgPool) {
    let user = new_user(&pool, "session@example.com").await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc".to_string(),
            expires_at: Utc::now() + Duration::days(1),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    let first = SessionRepo::consume_refresh_token(&pool, "abc").await.unwrap();
    assert_eq!(first.map(|s| s.user_id), Some(user.id));

    let second = SessionRepo::consume_refresh_token(&pool, "abc").await.unwrap();
    assert!(second.is_none(), "a refresh token must only work once");

    let cleaned = SessionRepo::cleanup_for_user(&pool, user.id).await.unwrap();
    assert_eq!(cleaned, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_refresh_token_not_consumed(pool: PgPool) {
    let user = new_user(&pool, "expired@example.com").await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "old".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::consume_refresh_token(&pool, "old")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Projects & areas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_are_scoped_to_owner(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let project = ProjectRepo::create(
        &pool,
        alice.id,
        &CreateProject {
            name: "Alice's flat".to_string(),
            description: Some("Two rooms".to_string()),
        },
    )
    .await
    .unwrap();

    assert!(ProjectRepo::find_owned(&pool, project.id, bob.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProjectRepo::list_by_owner(&pool, bob.id).await.unwrap().is_empty());

    let renamed = ProjectRepo::update(
        &pool,
        project.id,
        bob.id,
        &UpdateProject {
            name: Some("Hijacked".to_string()),
            description: None,
        },
    )
    .await
    .unwrap();
    assert!(renamed.is_none());

    let renamed = ProjectRepo::update(
        &pool,
        project.id,
        alice.id,
        &UpdateProject {
            name: Some("Alice's house".to_string()),
            description: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Alice's house");
    assert_eq!(renamed.description.as_deref(), Some("Two rooms"));

    assert!(ProjectRepo::delete(&pool, project.id, bob.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_area_name_unique_per_project(pool: PgPool) {
    let (user_id, area_id, _) = seed_photo(&pool, "area@example.com", "k/1.png").await;
    let area = AreaRepo::find_owned(&pool, area_id, user_id).await.unwrap().unwrap();

    let err = AreaRepo::create(
        &pool,
        area.project_id,
        &CreateArea {
            name: "Kitchen".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_areas_project_id_name")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_area_listing_counts_photos(pool: PgPool) {
    let (user_id, area_id, _) = seed_photo(&pool, "counts@example.com", "k/2.png").await;
    let area = AreaRepo::find_owned(&pool, area_id, user_id).await.unwrap().unwrap();
    AreaRepo::create(
        &pool,
        area.project_id,
        &CreateArea {
            name: "Attic".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let areas = AreaRepo::list_by_project(&pool, area.project_id).await.unwrap();
    let names: Vec<_> = areas.iter().map(|a| (a.name.as_str(), a.photo_count)).collect();
    assert_eq!(names, vec![("Attic", 0), ("Kitchen", 1)]);

    let updated = AreaRepo::update(
        &pool,
        area_id,
        user_id,
        &UpdateArea {
            name: None,
            description: Some("Ground floor".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Kitchen");
    assert_eq!(updated.description.as_deref(), Some("Ground floor"));
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_photo_listing_filters_and_pages(pool: PgPool) {
    let (user_id, area_id, first) = seed_photo(&pool, "list@example.com", "k/3.png").await;
    let second = PhotoRepo::create(
        &pool,
        &CreatePhoto {
            area_id,
            owner_id: user_id,
            name: "South wall".to_string(),
            storage_key: "k/4.png".to_string(),
            content_type: "image/png".to_string(),
            file_size_bytes: 10,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap();

    let all = PhotoRepo::list_owned(&pool, user_id, Some(area_id), 10, 0).await.unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second.id, first]);

    let page = PhotoRepo::list_owned(&pool, user_id, None, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first);

    let other = new_user(&pool, "other@example.com").await;
    assert!(PhotoRepo::list_owned(&pool, other.id, None, 10, 0)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_photo_rename_and_delete_returns_key(pool: PgPool) {
    let (user_id, _, photo_id) = seed_photo(&pool, "del@example.com", "k/5.png").await;

    let renamed = PhotoRepo::update(
        &pool,
        photo_id,
        user_id,
        &UpdatePhoto {
            name: Some("Renamed".to_string()),
            area_id: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.dimensions(), Some((800, 600)));

    let key = PhotoRepo::delete(&pool, photo_id, user_id).await.unwrap();
    assert_eq!(key.as_deref(), Some("k/5.png"));
    assert!(PhotoRepo::find_owned(&pool, photo_id, user_id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Annotations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_crud(pool: PgPool) {
    let (user_id, _, photo_id) = seed_photo(&pool, "ann@example.com", "k/6.png").await;

    let a = AnnotationRepo::create(&pool, photo_id, user_id, &marker("Crack", 10.0, 20.0))
        .await
        .unwrap();
    let b = AnnotationRepo::create(&pool, photo_id, user_id, &marker("Stain", 55.5, 80.0))
        .await
        .unwrap();

    let listed = AnnotationRepo::list_by_photo(&pool, photo_id).await.unwrap();
    assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![a.id, b.id]);

    let moved = AnnotationRepo::update(
        &pool,
        a.id,
        user_id,
        &UpdateAnnotation {
            pos_x: Some(12.5),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.pos_x, 12.5);
    assert_eq!(moved.pos_y, 20.0);
    assert_eq!(moved.title, "Crack");

    assert!(AnnotationRepo::delete(&pool, a.id, user_id).await.unwrap());
    assert!(!AnnotationRepo::delete(&pool, a.id, user_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_position_check_constraint(pool: PgPool) {
    let (user_id, _, photo_id) = seed_photo(&pool, "check@example.com", "k/7.png").await;
    let err = AnnotationRepo::create(&pool, photo_id, user_id, &marker("Off", 101.0, 5.0))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("ck_annotations_pos_x")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_hidden_from_other_users(pool: PgPool) {
    let (user_id, _, photo_id) = seed_photo(&pool, "mine@example.com", "k/8.png").await;
    let other = new_user(&pool, "theirs@example.com").await;
    let ann = AnnotationRepo::create(&pool, photo_id, user_id, &marker("Mine", 1.0, 1.0))
        .await
        .unwrap();

    assert!(AnnotationRepo::find_owned(&pool, ann.id, other.id)
        .await
        .unwrap()
        .is_none());
    assert!(!AnnotationRepo::delete(&pool, ann.id, other.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_delete_cascades_and_returns_keys(pool: PgPool) {
    let (user_id, area_id, photo_id) = seed_photo(&pool, "cascade@example.com", "k/9.png").await;
    AnnotationRepo::create(&pool, photo_id, user_id, &marker("Gone", 5.0, 5.0))
        .await
        .unwrap();
    let area = AreaRepo::find_owned(&pool, area_id, user_id).await.unwrap().unwrap();

    let keys = ProjectRepo::delete(&pool, area.project_id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(keys, vec!["k/9.png".to_string()]);

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM annotations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_area_delete_waits_for_inflight_photo_insert(pool: PgPool) {
    let (user_id, area_id, _) = seed_photo(&pool, "race@example.com", "k/first.png").await;

    // An upload that has inserted its row but not yet committed.
    let mut upload = pool.begin().await.unwrap();
    sqlx::query(
        "INSERT INTO photos (area_id, owner_id, name, storage_key, content_type, file_size_bytes)
         VALUES ($1, $2, 'Late', 'k/late.png', 'image/png', 10)",
    )
    .bind(area_id)
    .bind(user_id)
    .execute(&mut *upload)
    .await
    .unwrap();

    let delete = tokio::spawn({
        let pool = pool.clone();
        async move { AreaRepo::delete(&pool, area_id, user_id).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    upload.commit().await.unwrap();

    let mut keys = delete.await.unwrap().unwrap().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["k/first.png".to_string(), "k/late.png".to_string()]);
}

// ---------------------------------------------------------------------------
// Support requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_support_requests_listed_per_user(pool: PgPool) {
    let user = new_user(&pool, "help@example.com").await;
    let other = new_user(&pool, "quiet@example.com").await;
    let created = SupportRequestRepo::create(
        &pool,
        user.id,
        &CreateSupportRequest {
            subject: "Upload fails".to_string(),
            message: "Large PNGs are rejected".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.status, "open");

    assert_eq!(SupportRequestRepo::list_by_user(&pool, user.id).await.unwrap().len(), 1);
    assert!(SupportRequestRepo::list_by_user(&pool, other.id)
        .await
        .unwrap()
        .is_empty());
}
