//! Conversation API module
//!
//! The chat transport forwards admin commands and replies here, one call
//! per inbound event.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{user_id}/flows/{flow}", post(handler::start_flow))
        .route(
            "/{user_id}/conversation",
            post(handler::step).delete(handler::cancel),
        )
}
