//! Dropdown Option Routes

use axum::{extract::State, Json};
use feature_engine::Catalog;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Makes, models, conditions and the model → make mapping
pub async fn get_options(State(state): State<Arc<AppState>>) -> Result<Json<Catalog>, ApiError> {
    let loaded = state.loaded.as_ref().ok_or(ApiError::SchemaNotLoaded)?;
    Ok(Json(loaded.catalog.clone()))
}
