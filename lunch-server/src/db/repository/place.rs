//! Place Repository

use super::{RepoError, RepoResult};
use shared::models::{Place, PlaceCreate};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Place>> {
    let place = sqlx::query_as::<_, Place>(
        "SELECT id, name, address, category, city, photo_id, admin_comment, created_at FROM places WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(place)
}

pub async fn create(pool: &SqlitePool, data: PlaceCreate) -> RepoResult<Place> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("Place name must not be empty".into()));
    }
    if data.address.trim().is_empty() {
        return Err(RepoError::Validation(
            "Place address must not be empty".into(),
        ));
    }

    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO places (name, address, category, city, photo_id, admin_comment, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.category)
    .bind(&data.city)
    .bind(&data.photo_id)
    .bind(&data.admin_comment)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create place".into()))
}

/// Venues of one city, ordered by name. Used by the admin selection pages.
pub async fn find_by_city(
    pool: &SqlitePool,
    city: &str,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Place>> {
    let places = sqlx::query_as::<_, Place>(
        "SELECT id, name, address, category, city, photo_id, admin_comment, created_at FROM places WHERE city = ? ORDER BY name LIMIT ? OFFSET ?",
    )
    .bind(city)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(places)
}

pub async fn count_by_city(pool: &SqlitePool, city: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM places WHERE city = ?")
        .bind(city)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
