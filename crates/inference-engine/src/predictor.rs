//! Price Predictor
//!
//! Encodes car attributes against the schema, runs the model on the single
//! resulting row and rounds the price to cents.

use crate::model::PriceModel;
use crate::InferenceError;
use feature_engine::{CarAttributes, ColumnSchema, EncodeError, FeatureEncoder, FeatureVector};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors while serving a prediction
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Result of a prediction
#[derive(Debug, Clone, Serialize)]
pub struct PriceEstimate {
    /// Price rounded to 2 decimals
    pub price: f64,
    /// Encode + inference latency in microseconds
    pub latency_us: u64,
}

/// Round to 2 decimal places from the exact binary value, ties to even.
///
/// Formatting is exact, so `6249.625` rounds to `6249.62` and `0.015` (just
/// below the tie in binary) to `0.01`. Large magnitudes come back unchanged.
pub fn round_price(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Schema-bound encoder plus model
#[derive(Debug)]
pub struct Predictor {
    schema: ColumnSchema,
    encoder: FeatureEncoder,
    model: Box<dyn PriceModel>,
}

impl Predictor {
    /// Pair a schema with a model, checking the model's declared input size
    pub fn new(schema: ColumnSchema, model: Box<dyn PriceModel>) -> Result<Self, InferenceError> {
        if let Some(expected) = model.input_dimension() {
            if expected != schema.len() {
                return Err(InferenceError::InvalidInputShape {
                    expected,
                    actual: schema.len(),
                });
            }
        }

        info!(
            "Predictor ready: {} model over {} columns",
            model.kind(),
            schema.len()
        );

        let encoder = FeatureEncoder::new(&schema);
        Ok(Self {
            schema,
            encoder,
            model,
        })
    }

    /// Reject unknown categorical values instead of zero-filling them
    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.encoder = self.encoder.with_strict_categories(strict);
        self
    }

    /// Encode only, without running the model
    pub fn encode(&self, attrs: &CarAttributes) -> Result<FeatureVector, EncodeError> {
        self.encoder.encode(attrs)
    }

    /// Predict the price for one car
    pub fn predict(&self, attrs: &CarAttributes) -> Result<PriceEstimate, PredictError> {
        let start = Instant::now();

        let features = self.encoder.encode(attrs)?;
        let raw = self.model.predict(features.as_slice())?;
        let price = round_price(raw);

        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned non-finite price {raw}"
            ))
            .into());
        }

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Raw prediction {} in {}us", raw, latency_us);

        Ok(PriceEstimate { price, latency_us })
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }
}
