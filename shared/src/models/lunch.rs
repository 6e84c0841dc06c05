//! Business Lunch Model (schedule row)

use serde::{Deserialize, Serialize};

/// One lunch offering of a venue for one weekday.
///
/// `weekday` is 0 for "every day" and 1..=7 for Monday..=Sunday. Rows are
/// insert-only; a re-submission for the same day adds a second row and
/// readers pick the one with the greatest id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusinessLunch {
    pub id: i64,
    pub place_id: i64,
    pub weekday: i64,
    pub price: f64,
    /// Wall-clock "HH:MM", no timezone
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}

/// Create business lunch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessLunchCreate {
    pub place_id: i64,
    pub weekday: i64,
    pub price: f64,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}
