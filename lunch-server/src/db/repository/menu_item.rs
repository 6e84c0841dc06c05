//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, Place};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, place_id, name, price, category, description FROM menu_items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation(
            "Menu item name must not be empty".into(),
        ));
    }
    if data.price <= 0.0 {
        return Err(RepoError::Validation(format!(
            "Menu item price must be positive: {}",
            data.price
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_items (place_id, name, price, category, description) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.place_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.category)
    .bind(&data.description)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn find_by_place(pool: &SqlitePool, place_id: i64) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, place_id, name, price, category, description FROM menu_items WHERE place_id = ? ORDER BY category, name",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Items of one venue whose name or category contains the query.
pub async fn find_matching(
    pool: &SqlitePool,
    place_id: i64,
    query: &str,
) -> RepoResult<Vec<MenuItem>> {
    let pattern = format!("%{query}%");
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, place_id, name, price, category, description FROM menu_items WHERE place_id = ? AND (name LIKE ? OR category LIKE ?) ORDER BY category, name",
    )
    .bind(place_id)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Distinct venues of a city with a menu item matching the query by name
/// or category (substring, case-insensitive per SQLite LIKE semantics).
pub async fn search_places(
    pool: &SqlitePool,
    city: &str,
    query: &str,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Place>> {
    let pattern = format!("%{query}%");
    let places = sqlx::query_as::<_, Place>(
        "SELECT DISTINCT p.id, p.name, p.address, p.category, p.city, p.photo_id, p.admin_comment, p.created_at FROM places p JOIN menu_items mi ON p.id = mi.place_id WHERE p.city = ? AND (mi.name LIKE ? OR mi.category LIKE ?) ORDER BY p.name LIMIT ? OFFSET ?",
    )
    .bind(city)
    .bind(&pattern)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(places)
}

pub async fn count_search_results(
    pool: &SqlitePool,
    city: &str,
    query: &str,
) -> RepoResult<i64> {
    let pattern = format!("%{query}%");
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT p.id) FROM places p JOIN menu_items mi ON p.id = mi.place_id WHERE p.city = ? AND (mi.name LIKE ? OR mi.category LIKE ?)",
    )
    .bind(city)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
