//! Health Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_kind: Option<&'static str>,
    pub makes_count: usize,
    pub models_count: usize,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let loaded = state.loaded.as_ref();

    Json(HealthResponse {
        status: if loaded.is_some() { "healthy" } else { "degraded" },
        model_loaded: loaded.is_some(),
        model_kind: loaded.map(|l| l.predictor.model_kind()),
        makes_count: loaded.map_or(0, |l| l.catalog.makes.len()),
        models_count: loaded.map_or(0, |l| l.catalog.models.len()),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
