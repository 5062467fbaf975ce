//! Status handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Version reported by the API root
pub const API_VERSION: &str = "1.0.0";

/// API root response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    /// `MongoDB` or `In-Memory`
    pub database: String,
}

/// API name, version and the storage backend in use
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Language Flashcards API".to_string(),
        version: API_VERSION.to_string(),
        database: state.flashcards.storage_mode().label().to_string(),
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.flashcards.storage_mode().to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub storage: String,
    pub generator: ServiceStatus,
}

/// Status of a dependent service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Readiness check - can the card generator be reached?
///
/// Storage does not affect readiness since it falls back to memory.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let generator_healthy = state.flashcards.is_generator_healthy().await;
    let status_code = if generator_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: generator_healthy,
            storage: state.flashcards.storage_mode().to_string(),
            generator: ServiceStatus {
                healthy: generator_healthy,
            },
        }),
    )
}
