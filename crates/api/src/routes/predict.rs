//! Price Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_engine::CarAttributes;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::telemetry::{record_latency, record_prediction};
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

/// Predict a car's price
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CarAttributes>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Some(loaded) = state.loaded.as_ref() else {
        record_prediction("unavailable");
        return Err(ApiError::ModelNotLoaded);
    };

    let Json(attrs) = payload.map_err(|rejection| {
        record_prediction("rejected");
        ApiError::BadRequest(rejection.body_text())
    })?;
    debug!("Received prediction request: {:?}", attrs);

    let estimate = loaded.predictor.predict(&attrs).map_err(|e| {
        warn!("Prediction error: {}", e);
        record_prediction("rejected");
        ApiError::from(e)
    })?;

    record_prediction("ok");
    record_latency(Duration::from_micros(estimate.latency_us));
    info!("Prediction: {}", estimate.price);

    Ok(Json(PredictResponse {
        predicted_price: estimate.price,
    }))
}
