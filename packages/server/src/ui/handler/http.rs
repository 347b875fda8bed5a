//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RelayStatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current connection count and history usage
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RelayStatsDto> {
    let stats = state.get_relay_stats_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(RelayStatsDto {
        connected: stats.connected,
        history_len: stats.history_len,
        history_capacity: stats.history_capacity,
    })
}
