//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AdminFlagPayload {
    pub is_admin: bool,
}

/// PUT /api/admin/users/{user_id}/admin - grant or revoke the admin flag
pub async fn set_admin(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AdminFlagPayload>,
) -> AppResult<Json<bool>> {
    let updated = user::set_admin_status(state.pool(), user_id, payload.is_admin).await?;
    if !updated {
        return Err(AppError::not_found(format!("User {user_id} not found")));
    }
    tracing::info!(user_id, is_admin = payload.is_admin, "Admin flag updated");
    Ok(Json(true))
}
