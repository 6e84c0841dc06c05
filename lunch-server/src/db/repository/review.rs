//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::{Review, ReviewCreate, ReviewSummary};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, place_id, rating, comment, created_at FROM reviews WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(review)
}

pub async fn create(pool: &SqlitePool, data: ReviewCreate) -> RepoResult<Review> {
    if !(1..=5).contains(&data.rating) {
        return Err(RepoError::Validation(format!(
            "Rating must be between 1 and 5: {}",
            data.rating
        )));
    }

    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews (user_id, place_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.user_id)
    .bind(data.place_id)
    .bind(data.rating)
    .bind(&data.comment)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

/// Reviews of one venue, newest first.
pub async fn find_by_place(pool: &SqlitePool, place_id: i64) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, place_id, rating, comment, created_at FROM reviews WHERE place_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

/// Average rating and review count for one venue. Average is 0.0 when
/// there are no reviews; callers distinguish via `count`.
pub async fn summary(pool: &SqlitePool, place_id: i64) -> RepoResult<ReviewSummary> {
    let (average, count) = sqlx::query_as::<_, (f64, i64)>(
        "SELECT COALESCE(AVG(rating), 0.0), COUNT(*) FROM reviews WHERE place_id = ?",
    )
    .bind(place_id)
    .fetch_one(pool)
    .await?;
    Ok(ReviewSummary { average, count })
}
