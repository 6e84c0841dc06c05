//! Admin bootstrap API module
//!
//! Deploy this behind the operator's loopback/ingress rules; the admin
//! flag is never settable through a user-facing flow.

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/users/{user_id}/admin", put(handler::set_admin))
}
