//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Lookups that take an
//! `owner_id` only match rows under a project owned by that user, so a
//! foreign id behaves exactly like a missing one.

pub mod annotation_repo;
pub mod area_repo;
pub mod photo_repo;
pub mod project_repo;
pub mod session_repo;
pub mod support_request_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use area_repo::AreaRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use support_request_repo::SupportRequestRepo;
pub use user_repo::UserRepo;
