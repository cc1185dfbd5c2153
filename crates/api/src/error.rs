//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::PredictError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by handlers, rendered as `{"error": message}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Model not loaded")]
    ModelNotLoaded,
    #[error("Model columns not loaded")]
    SchemaNotLoaded,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ModelNotLoaded | ApiError::SchemaNotLoaded => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) | ApiError::Predict(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
