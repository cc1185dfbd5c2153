//! Linear Regression Model
//!
//! Coefficients exported from a fitted linear regressor, stored as
//! `{"coefficients": [...], "intercept": ...}`.

use crate::model::PriceModel;
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Linear model: `intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearPriceModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Parse exported coefficients
    pub fn from_json_str(json: &str) -> Result<Self, InferenceError> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        if model.coefficients.is_empty() {
            return Err(InferenceError::ModelLoadError(
                "linear model has no coefficients".to_string(),
            ));
        }
        Ok(model)
    }

    /// Load exported coefficients from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;

        let model = Self::from_json_str(&json)?;
        info!(
            "Loaded linear model with {} coefficients from {}",
            model.coefficients.len(),
            path.display()
        );
        Ok(model)
    }
}

impl PriceModel for LinearPriceModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn input_dimension(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}
