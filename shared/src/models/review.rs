//! Review Model

use serde::{Deserialize, Serialize};

/// A user rating of a venue. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub place_id: i64,
    /// 1..=5 inclusive
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub user_id: i64,
    pub place_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Rating aggregate for one venue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub average: f64,
    pub count: i64,
}
