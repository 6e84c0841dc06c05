//! User Repository

use super::RepoResult;
use shared::models::UserProfile;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<UserProfile>> {
    let user = sqlx::query_as::<_, UserProfile>(
        "SELECT user_id, username, city, is_admin, created_at FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Insert or update the profile of a transport user. The admin flag is
/// deliberately untouched here; see [`set_admin_status`].
pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    username: Option<&str>,
    city: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO users (user_id, username, city, is_admin, created_at) VALUES (?, ?, ?, 0, ?) ON CONFLICT(user_id) DO UPDATE SET username = excluded.username, city = excluded.city",
    )
    .bind(user_id)
    .bind(username)
    .bind(city)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn city_of(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<String>> {
    let city = sqlx::query_scalar::<_, Option<String>>(
        "SELECT city FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(city.flatten())
}

pub async fn is_admin(pool: &SqlitePool, user_id: i64) -> RepoResult<bool> {
    let is_admin = sqlx::query_scalar::<_, bool>(
        "SELECT is_admin FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(is_admin.unwrap_or(false))
}

/// Set the admin flag. Returns false when no such user exists.
pub async fn set_admin_status(
    pool: &SqlitePool,
    user_id: i64,
    is_admin: bool,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE users SET is_admin = ? WHERE user_id = ?")
        .bind(is_admin)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
