//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Relay statistics for `/api/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayStatsDto {
    pub connected: usize,
    pub history_len: usize,
    pub history_capacity: usize,
}
