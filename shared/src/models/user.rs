//! User Profile Model

use serde::{Deserialize, Serialize};

/// Profile of a transport user.
///
/// `user_id` is the chat transport identity. The admin flag is only ever
/// set through the bootstrap endpoint, never by the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub user_id: i64,
    pub username: Option<String>,
    /// Required before any city-scoped read succeeds
    pub city: Option<String>,
    pub is_admin: bool,
    pub created_at: i64,
}
