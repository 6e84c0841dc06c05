//! Shared domain types for the Lunch Hunter backend.
//!
//! Records produced by the storage layer and consumed by the service
//! crate live here, so that clients of the HTTP API can reuse the same
//! wire shapes. Database support (`sqlx::FromRow` derives) is gated
//! behind the `db` feature.

pub mod models;
pub mod util;
