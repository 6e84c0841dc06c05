//! User API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{user_id}", get(handler::get_profile))
        .route("/{user_id}/city", put(handler::set_city))
        .route("/{user_id}/lunches", get(handler::list_lunches))
        .route("/{user_id}/search", get(handler::search_menu))
}
