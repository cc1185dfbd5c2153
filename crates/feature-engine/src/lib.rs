//! Feature Engineering Engine
//!
//! Turns car attributes into the feature vector layout a trained price model
//! expects, and derives the option catalog served to the front-end.

mod attributes;
mod catalog;
mod encoder;
mod error;
mod schema;

pub use attributes::CarAttributes;
pub use catalog::{Catalog, ModelMakeMapping, FALLBACK_MANUFACTURER, KNOWN_MANUFACTURERS};
pub use encoder::{CategoricalField, FeatureEncoder, FeatureVector, NumericField};
pub use error::{EncodeError, SchemaError};
pub use schema::ColumnSchema;
