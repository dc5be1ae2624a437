//! Health check endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub files: usize,
    pub pending_interests: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let hub = state.hub();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        files: hub.file_count(),
        pending_interests: hub.pending_interest_count(),
    })
}
