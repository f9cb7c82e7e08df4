//! REST request handlers
//!
//! Read-only collaborator interfaces: the catalog query and the snapshot
//! query used for initial page load before the realtime channel connects.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::error;

use syncplay_common::{PlaybackState, Track};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "syncplay-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/songs - Full track catalog
pub async fn get_songs(State(state): State<AppState>) -> Json<Vec<Track>> {
    Json(state.catalog.all().to_vec())
}

/// GET /api/state - Current playback snapshot
///
/// Served by the hub task through its serialized command path, so the
/// snapshot is consistent with the broadcast stream.
pub async fn get_state(
    State(state): State<AppState>,
) -> Result<Json<PlaybackState>, (StatusCode, Json<ErrorResponse>)> {
    match state.hub.snapshot().await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            error!("Failed to query playback snapshot: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
