//! Menu Item Model

use serde::{Deserialize, Serialize};

/// One menu position of a venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub place_id: i64,
    pub name: String,
    pub price: f64,
    /// Administrator-chosen category label ("drinks", "desserts", ...)
    pub category: String,
    pub description: Option<String>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub place_id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
}
