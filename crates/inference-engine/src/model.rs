//! Price Model Abstraction

use crate::InferenceError;
use std::fmt::Debug;

/// A trained regressor mapping one feature row to a price
pub trait PriceModel: Debug + Send + Sync {
    /// Predict the price for a single feature row
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Expected row length, when the artifact declares it
    fn input_dimension(&self) -> Option<usize>;

    /// Short backend name for logs and health output
    fn kind(&self) -> &'static str;
}
