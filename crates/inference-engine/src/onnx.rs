//! ONNX Price Model
//!
//! Runs a regressor exported to ONNX (e.g. with skl2onnx) through tract.
//! The graph takes one `f32` row of shape `[1, n]`; the first element of the
//! first output is the price.

use crate::model::PriceModel;
use crate::InferenceError;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Optimized, runnable ONNX regressor
pub struct OnnxPriceModel {
    plan: OnnxPlan,
    input_dimension: usize,
}

impl OnnxPriceModel {
    /// Load and optimize an ONNX graph for rows of `input_dimension` features
    pub fn load(path: impl AsRef<Path>, input_dimension: usize) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!(
            "Loading ONNX model from {} (input dimension {})",
            path.display(),
            input_dimension
        );

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, input_dimension]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("ONNX model loaded successfully");
        Ok(Self {
            plan,
            input_dimension,
        })
    }
}

impl std::fmt::Debug for OnnxPriceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxPriceModel")
            .field("input_dimension", &self.input_dimension)
            .finish_non_exhaustive()
    }
}

impl PriceModel for OnnxPriceModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.input_dimension {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_dimension,
                actual: features.len(),
            });
        }

        let row: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[1, self.input_dimension], &row)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no output".to_string()))?
            .cast_to::<f64>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let price = output
            .as_slice::<f64>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
            .first()
            .copied()
            .ok_or_else(|| InferenceError::InferenceFailed("model output is empty".to_string()))?;

        debug!("ONNX output: {}", price);
        Ok(price)
    }

    fn input_dimension(&self) -> Option<usize> {
        Some(self.input_dimension)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
