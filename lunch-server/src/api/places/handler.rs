//! Place API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::LunchView;
use crate::core::ServerState;
use crate::db::repository::{menu_item, place, review};
use crate::schedule;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, maps};
use shared::models::{MenuItem, Place, Review, ReviewCreate, ReviewSummary};

async fn require_place(state: &ServerState, id: i64) -> Result<Place, AppError> {
    place::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Place {id} not found")))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// 1..=7; omitted means "today"
    pub weekday: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PlaceDetails {
    pub place: Place,
    /// Resolved lunch for the requested weekday, day-specific row first,
    /// "every day" as the fallback
    pub lunch: Option<LunchView>,
    pub rating: ReviewSummary,
}

/// GET /api/places/{id} - venue detail with the resolved lunch
pub async fn get_details(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<PlaceDetails>> {
    let found = require_place(&state, id).await?;

    let weekday = query.weekday.unwrap_or_else(schedule::current_weekday);
    if !(1..=7).contains(&weekday) {
        return Err(AppError::validation(format!(
            "Weekday must be 1..=7: {weekday}"
        )));
    }

    let lunch = schedule::resolve(state.pool(), id, weekday)
        .await?
        .map(LunchView::from);
    let rating = review::summary(state.pool(), id).await?;

    Ok(Json(PlaceDetails {
        place: found,
        lunch,
        rating,
    }))
}

/// GET /api/places/{id}/week - every stored schedule row, weekday ascending
pub async fn get_week(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<LunchView>>> {
    require_place(&state, id).await?;
    let week = schedule::resolve_all(state.pool(), id).await?;
    Ok(Json(week.into_iter().map(LunchView::from).collect()))
}

/// GET /api/places/{id}/menu - full menu, grouped by category ordering
pub async fn get_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MenuItem>>> {
    require_place(&state, id).await?;
    let items = menu_item::find_by_place(state.pool(), id).await?;
    Ok(Json(items))
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub url: String,
}

/// GET /api/places/{id}/route - map link for the venue
pub async fn get_route(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RouteResponse>> {
    let found = require_place(&state, id).await?;
    Ok(Json(RouteResponse {
        url: maps::yandex_maps_url(&found.address, Some(&found.name)),
    }))
}

#[derive(Debug, Serialize)]
pub struct ReviewList {
    pub summary: ReviewSummary,
    pub reviews: Vec<Review>,
}

/// GET /api/places/{id}/reviews - reviews newest first, with the aggregate
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReviewList>> {
    require_place(&state, id).await?;
    let summary = review::summary(state.pool(), id).await?;
    let reviews = review::find_by_place(state.pool(), id).await?;
    Ok(Json(ReviewList { summary, reviews }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub user_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

/// POST /api/places/{id}/reviews - submit a rating
pub async fn create_review(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewPayload>,
) -> AppResult<Json<Review>> {
    validate_optional_text(&payload.comment, "Comment", MAX_NOTE_LEN)?;
    require_place(&state, id).await?;

    let created = review::create(
        state.pool(),
        ReviewCreate {
            user_id: payload.user_id,
            place_id: id,
            rating: payload.rating,
            comment: payload.comment,
        },
    )
    .await?;

    tracing::info!(place_id = id, rating = created.rating, "Review added");
    Ok(Json(created))
}
