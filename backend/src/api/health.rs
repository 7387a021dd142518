//! Health endpoint

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the server answers
    pub status: String,
    /// Number of sessions in memory
    pub active_sessions: usize,
}

/// GET /v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        active_sessions: state.sessions.len().await,
    })
}
