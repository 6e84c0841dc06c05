//! Place API module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/places", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_details))
        .route("/{id}/week", get(handler::get_week))
        .route("/{id}/menu", get(handler::get_menu))
        .route("/{id}/route", get(handler::get_route))
        .route(
            "/{id}/reviews",
            get(handler::list_reviews).post(handler::create_review),
        )
}
