pub mod annotation;
pub mod area;
pub mod auth;
pub mod photo;
pub mod profile;
pub mod project;
pub mod support;
