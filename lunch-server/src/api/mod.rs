//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`users`] - user profiles and city-scoped browsing/search
//! - [`places`] - venue details, full week, menu, reviews, route link
//! - [`conversation`] - admin flow entry and step inputs
//! - [`admin`] - admin-flag bootstrap

pub mod convert;

pub mod admin;
pub mod conversation;
pub mod health;
pub mod places;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(places::router())
        .merge(conversation::router())
        .merge(admin::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // CORS - the transport bridge may run on another origin
        .layer(CorsLayer::permissive())
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, ServerState};
    use crate::db::DbService;

    // Route registration panics on conflicting paths; building the app
    // is the whole test.
    #[tokio::test]
    async fn app_builds_without_route_conflicts() {
        let db = DbService::open_in_memory().await.unwrap();
        let config = Config::with_overrides("/tmp/lunch-router-test", 0);
        let state = ServerState::with_db(config, db);
        let _app = build_app(&state);
    }
}
