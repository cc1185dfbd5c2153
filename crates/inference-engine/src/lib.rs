//! Price Inference Engine
//!
//! Loads the trained price regressor and runs it on encoded feature vectors.

mod linear;
mod loader;
mod model;
mod onnx;
mod predictor;

pub use linear::LinearPriceModel;
pub use loader::load_model;
pub use model::PriceModel;
pub use onnx::OnnxPriceModel;
pub use predictor::{round_price, PredictError, PriceEstimate, Predictor};

use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Unsupported model artifact {path}: export the regressor to ONNX (.onnx) or linear coefficients (.json)")]
    UnsupportedFormat { path: String },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}
