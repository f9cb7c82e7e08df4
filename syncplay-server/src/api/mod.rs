//! HTTP and WebSocket API
//!
//! Two read-only REST endpoints bootstrap clients before the realtime
//! channel connects; everything mutable goes over `/ws` through the hub.

pub mod handlers;
pub mod ws;

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::hub::HubHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle into the sync hub task
    pub hub: HubHandle,
    /// Read-only track catalog
    pub catalog: Arc<Catalog>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))

        // Read-only bootstrap endpoints
        .route("/api/songs", get(handlers::get_songs))
        .route("/api/state", get(handlers::get_state))

        // Realtime channel
        .route("/ws", get(ws::ws_handler))

        .with_state(state)

        // Enable CORS for controller dev servers on other origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
