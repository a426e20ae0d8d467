//! Core library exports for the blog admin service.
//!
//! The `data` feature exposes the domain model, Diesel models and schema and
//! the repositories. The `server` feature adds forms, services and the
//! Actix-web routes used by the admin application.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required to access the category admin pages.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
