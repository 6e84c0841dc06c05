//! User API Handlers
//!
//! City-scoped browsing lives here because the city comes from the
//! user's profile. List views recompute the total against the current
//! filter on every request; the weekday and query travel with the page
//! number, so a pagination request can never see a stale count.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::api::convert::LunchView;
use crate::core::ServerState;
use crate::db::repository::{lunch, menu_item, review, user};
use crate::pagination;
use crate::schedule;
use crate::utils::{AppError, AppResult};
use shared::models::{MenuItem, Place, ReviewSummary, UserProfile};

/// GET /api/users/{user_id} - profile lookup
pub async fn get_profile(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    let profile = user::find_by_id(state.pool(), user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct SetCityPayload {
    pub city: String,
    pub username: Option<String>,
}

/// PUT /api/users/{user_id}/city - select the user's city
pub async fn set_city(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<SetCityPayload>,
) -> AppResult<Json<UserProfile>> {
    if !state.config.cities.contains(&payload.city) {
        return Err(AppError::validation(format!(
            "Unknown city: {}",
            payload.city
        )));
    }
    user::upsert(
        state.pool(),
        user_id,
        payload.username.as_deref(),
        &payload.city,
    )
    .await?;
    let profile = user::find_by_id(state.pool(), user_id)
        .await?
        .ok_or_else(|| AppError::internal("Profile missing right after upsert"))?;
    Ok(Json(profile))
}

/// The city precondition for city-scoped reads
async fn require_city(pool: &SqlitePool, user_id: i64) -> Result<String, AppError> {
    user::city_of(pool, user_id).await?.ok_or_else(|| {
        AppError::business_rule("Select a city first (PUT /api/users/{user_id}/city)")
    })
}

fn validate_browse_weekday(weekday: i64) -> Result<(), AppError> {
    if !(1..=7).contains(&weekday) {
        return Err(AppError::validation(format!(
            "Weekday must be 1..=7: {weekday}"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct LunchListQuery {
    /// 1..=7; omitted means "today"
    pub weekday: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LunchListEntry {
    pub place: Place,
    pub lunch: LunchView,
    pub rating: ReviewSummary,
}

#[derive(Debug, Serialize)]
pub struct LunchPage {
    pub weekday: i64,
    pub weekday_name: &'static str,
    pub total: i64,
    pub page: i64,
    pub page_count: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub places: Vec<LunchListEntry>,
}

/// GET /api/users/{user_id}/lunches - venues with a lunch for a weekday
pub async fn list_lunches(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Query(query): Query<LunchListQuery>,
) -> AppResult<Json<LunchPage>> {
    let city = require_city(state.pool(), user_id).await?;

    // The current weekday is injected here, at the call boundary
    let weekday = query.weekday.unwrap_or_else(schedule::current_weekday);
    validate_browse_weekday(weekday)?;

    let total = lunch::count_places_with_lunch(state.pool(), &city, weekday).await?;
    let page_size = state.config.browse_page_size;
    let page = pagination::clamp_page(query.page.unwrap_or(1), total, page_size);
    let window = pagination::paginate(total, page, page_size);

    let mut places = Vec::new();
    if total > 0 {
        for place in
            lunch::list_places_with_lunch(state.pool(), &city, weekday, page_size, window.offset)
                .await?
        {
            let rating = review::summary(state.pool(), place.id).await?;
            // The join guarantees an applicable row exists
            if let Some(row) = schedule::resolve(state.pool(), place.id, weekday).await? {
                places.push(LunchListEntry {
                    lunch: LunchView::from(row),
                    place,
                    rating,
                });
            }
        }
    }

    Ok(Json(LunchPage {
        weekday,
        weekday_name: schedule::weekday_name(weekday),
        total,
        page,
        page_count: window.page_count,
        has_prev: window.has_prev,
        has_next: window.has_next,
        places,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchEntry {
    pub place: Place,
    /// Menu items of this venue matching the query
    pub matches: Vec<MenuItem>,
    pub rating: ReviewSummary,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub total: i64,
    pub page: i64,
    pub page_count: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub places: Vec<SearchEntry>,
}

/// GET /api/users/{user_id}/search - venues by menu content (substring)
pub async fn search_menu(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let city = require_city(state.pool(), user_id).await?;

    let q = query.q.trim().to_string();
    if q.is_empty() {
        return Err(AppError::validation("Search query must not be empty"));
    }

    let total = menu_item::count_search_results(state.pool(), &city, &q).await?;
    let page_size = state.config.browse_page_size;
    let page = pagination::clamp_page(query.page.unwrap_or(1), total, page_size);
    let window = pagination::paginate(total, page, page_size);

    let mut places = Vec::new();
    if total > 0 {
        for place in
            menu_item::search_places(state.pool(), &city, &q, page_size, window.offset).await?
        {
            let matches = menu_item::find_matching(state.pool(), place.id, &q).await?;
            let rating = review::summary(state.pool(), place.id).await?;
            places.push(SearchEntry {
                place,
                matches,
                rating,
            });
        }
    }

    Ok(Json(SearchPage {
        query: q,
        total,
        page,
        page_count: window.page_count,
        has_prev: window.has_prev,
        has_next: window.has_next,
        places,
    }))
}
