//! Shared response shapes

use serde::Serialize;
use shared::models::BusinessLunch;

use crate::schedule;

/// A schedule row as rendered to clients, with the display day name
/// resolved from the weekday code.
#[derive(Debug, Clone, Serialize)]
pub struct LunchView {
    pub id: i64,
    pub weekday: i64,
    pub weekday_name: &'static str,
    pub price: f64,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}

impl From<BusinessLunch> for LunchView {
    fn from(lunch: BusinessLunch) -> Self {
        Self {
            id: lunch.id,
            weekday: lunch.weekday,
            weekday_name: schedule::weekday_name(lunch.weekday),
            price: lunch.price,
            start_time: lunch.start_time,
            end_time: lunch.end_time,
            description: lunch.description,
        }
    }
}
