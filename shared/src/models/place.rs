//! Place Model (venue)

use serde::{Deserialize, Serialize};

/// A venue offering business lunches and/or a regular menu.
///
/// Created once by an administrator; only the photo and the admin
/// annotation are expected to change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Venue category tag (free text: "cafe", "restaurant", "bar", ...)
    pub category: String,
    pub city: String,
    /// Transport-side photo reference, if one was attached
    pub photo_id: Option<String>,
    /// Free-text annotation shown on demand
    pub admin_comment: Option<String>,
    /// Creation time (unix millis)
    pub created_at: i64,
}

/// Create place payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCreate {
    pub name: String,
    pub address: String,
    pub category: String,
    pub city: String,
    pub photo_id: Option<String>,
    pub admin_comment: Option<String>,
}
