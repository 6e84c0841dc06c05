//! Business Lunch Repository

use super::{RepoError, RepoResult};
use shared::models::{BusinessLunch, BusinessLunchCreate, Place};
use sqlx::SqlitePool;

fn validate_weekday(weekday: i64) -> RepoResult<()> {
    if !(0..=7).contains(&weekday) {
        return Err(RepoError::Validation(format!(
            "Weekday code out of range: {weekday}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusinessLunch>> {
    let lunch = sqlx::query_as::<_, BusinessLunch>(
        "SELECT id, place_id, weekday, price, start_time, end_time, description FROM business_lunches WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(lunch)
}

pub async fn create(pool: &SqlitePool, data: BusinessLunchCreate) -> RepoResult<BusinessLunch> {
    validate_weekday(data.weekday)?;
    if data.price < 0.0 {
        return Err(RepoError::Validation(format!(
            "Price cannot be negative: {}",
            data.price
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO business_lunches (place_id, weekday, price, start_time, end_time, description) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.place_id)
    .bind(data.weekday)
    .bind(data.price)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(&data.description)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create business lunch".into()))
}

/// Every stored row of one venue, weekday ascending (0 = "every day"
/// first), insertion order as the stable second key.
pub async fn find_by_place(pool: &SqlitePool, place_id: i64) -> RepoResult<Vec<BusinessLunch>> {
    let lunches = sqlx::query_as::<_, BusinessLunch>(
        "SELECT id, place_id, weekday, price, start_time, end_time, description FROM business_lunches WHERE place_id = ? ORDER BY weekday, id",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await?;
    Ok(lunches)
}

/// Distinct venues of a city that have a lunch row applicable to the
/// given weekday (day-specific or "every day"), ordered by name.
pub async fn list_places_with_lunch(
    pool: &SqlitePool,
    city: &str,
    weekday: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Place>> {
    validate_weekday(weekday)?;
    let places = sqlx::query_as::<_, Place>(
        "SELECT DISTINCT p.id, p.name, p.address, p.category, p.city, p.photo_id, p.admin_comment, p.created_at FROM places p JOIN business_lunches bl ON p.id = bl.place_id WHERE p.city = ? AND (bl.weekday = ? OR bl.weekday = 0) ORDER BY p.name LIMIT ? OFFSET ?",
    )
    .bind(city)
    .bind(weekday)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(places)
}

pub async fn count_places_with_lunch(
    pool: &SqlitePool,
    city: &str,
    weekday: i64,
) -> RepoResult<i64> {
    validate_weekday(weekday)?;
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT p.id) FROM places p JOIN business_lunches bl ON p.id = bl.place_id WHERE p.city = ? AND (bl.weekday = ? OR bl.weekday = 0)",
    )
    .bind(city)
    .bind(weekday)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
