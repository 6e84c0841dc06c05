//! Conversation API Handlers
//!
//! Thin glue: the engine does the work, these endpoints move inputs and
//! replies across the HTTP boundary.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::conversation::{FlowInput, FlowKind, Reply};
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/users/{user_id}/flows/{flow} - enter an admin flow
///
/// `flow` is one of `add_place`, `add_lunch`, `add_menu`. The admin and
/// city checks happen once, here, at flow entry.
pub async fn start_flow(
    State(state): State<ServerState>,
    Path((user_id, flow)): Path<(i64, FlowKind)>,
) -> AppResult<Json<Reply>> {
    let reply = state.engine.start_flow(user_id, flow).await?;
    Ok(Json(reply))
}

/// POST /api/users/{user_id}/conversation - feed one input into the flow
pub async fn step(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Json(input): Json<FlowInput>,
) -> AppResult<Json<Reply>> {
    let reply = state.engine.handle(user_id, input).await?;
    Ok(Json(reply))
}

/// DELETE /api/users/{user_id}/conversation - cancel the active flow
pub async fn cancel(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Reply>> {
    Ok(Json(state.engine.cancel(user_id)))
}
