//! Domain logic for PaintSnap that does not touch the network or the database.

pub mod annotation;
pub mod auth_errors;
pub mod error;
pub mod pagination;
pub mod types;
pub mod upload;
pub mod validation;
