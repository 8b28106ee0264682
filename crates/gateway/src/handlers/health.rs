//! Health check handlers

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub corpus: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    pub records: usize,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: paperlens_common::VERSION.to_string(),
    })
}

/// Readiness probe - the corpus is loaded at startup, so readiness only
/// reports what was loaded
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let loaded = !state.corpus.is_empty();

    Json(ReadyResponse {
        status: if loaded { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            corpus: CheckResult {
                status: if loaded { "loaded" } else { "empty" }.to_string(),
                records: state.corpus.len(),
            },
        },
    })
}
