//! Feature Vector Encoding
//!
//! Numeric attributes are copied into their named columns and categorical
//! attributes are one-hot encoded into `<field>_<value>` columns. The lookup
//! from `(field, value)` to column index is built once from the schema.

use crate::attributes::CarAttributes;
use crate::error::EncodeError;
use crate::schema::ColumnSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Numeric request fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    EngineSize,
    HorsePower,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [Self::Age, Self::EngineSize, Self::HorsePower];

    /// Key in the request payload
    pub fn request_key(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::EngineSize => "Engine Size",
            Self::HorsePower => "Horse Power",
        }
    }

    /// Column name in the schema
    pub fn column(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::EngineSize => "engine size",
            Self::HorsePower => "horse power",
        }
    }
}

/// Categorical request fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Make,
    Model,
    Condition,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [Self::Make, Self::Model, Self::Condition];

    /// Key in the request payload
    pub fn request_key(&self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Condition => "Condition",
        }
    }

    /// One-hot column prefix, the lowercased field name plus `_`
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Make => "make_",
            Self::Model => "model_",
            Self::Condition => "condition_",
        }
    }

    /// One-hot column name for a value
    pub fn column_for(&self, value: &str) -> String {
        format!("{}{}", self.prefix(), value)
    }
}

/// Feature vector aligned to the column schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// All-zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: vec![0.0; dimension],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-zero positions
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Encodes car attributes against a fixed schema
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    dimension: usize,
    numeric: HashMap<NumericField, usize>,
    one_hot: HashMap<(CategoricalField, String), usize>,
    strict_categories: bool,
}

impl FeatureEncoder {
    /// Build the field lookups from a schema
    pub fn new(schema: &ColumnSchema) -> Self {
        let numeric: HashMap<NumericField, usize> = NumericField::ALL
            .iter()
            .filter_map(|field| schema.position(field.column()).map(|idx| (*field, idx)))
            .collect();

        let mut one_hot = HashMap::new();
        for (idx, column) in schema.columns().iter().enumerate() {
            for field in CategoricalField::ALL {
                if let Some(value) = column.strip_prefix(field.prefix()) {
                    one_hot.entry((field, value.to_string())).or_insert(idx);
                }
            }
        }

        debug!(
            "Feature encoder ready: dimension={}, numeric={}, one-hot={}",
            schema.len(),
            numeric.len(),
            one_hot.len()
        );

        Self {
            dimension: schema.len(),
            numeric,
            one_hot,
            strict_categories: false,
        }
    }

    /// Reject unknown categorical values instead of leaving them zero
    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict_categories
    }

    /// Length of produced vectors
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Column index of a numeric field
    pub fn numeric_position(&self, field: NumericField) -> Option<usize> {
        self.numeric.get(&field).copied()
    }

    /// Column index of a categorical value
    pub fn category_position(&self, field: CategoricalField, value: &str) -> Option<usize> {
        self.one_hot.get(&(field, value.to_string())).copied()
    }

    /// Encode attributes into a feature vector
    pub fn encode(&self, attrs: &CarAttributes) -> Result<FeatureVector, EncodeError> {
        let mut vector = FeatureVector::zeros(self.dimension);

        for field in NumericField::ALL {
            let Some(value) = attrs.numeric(field.request_key())? else {
                continue;
            };
            let idx = self
                .numeric_position(field)
                .ok_or(EncodeError::MissingColumn(field.column()))?;
            vector.values[idx] = value;
        }

        for field in CategoricalField::ALL {
            let Some(value) = attrs.category(field.request_key()) else {
                debug!("No {} supplied", field.request_key());
                continue;
            };

            match self.category_position(field, &value) {
                Some(idx) => vector.values[idx] = 1.0,
                None if self.strict_categories => {
                    return Err(EncodeError::UnknownCategory {
                        field: field.request_key(),
                        column: field.column_for(&value),
                        value,
                    });
                }
                None => warn!("{} not found in columns", field.column_for(&value)),
            }
        }

        Ok(vector)
    }
}
