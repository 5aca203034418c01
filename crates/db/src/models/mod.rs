//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod annotation;
pub mod area;
pub mod photo;
pub mod project;
pub mod session;
pub mod support;
pub mod user;
