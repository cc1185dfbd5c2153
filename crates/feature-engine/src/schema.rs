//! Column Schema
//!
//! The ordered list of feature names the model was trained on. Its order is
//! the source of truth for feature-vector indices.

use crate::error::SchemaError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// On-disk schema document: `{"data_columns": [...]}`
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    data_columns: Vec<String>,
}

/// Ordered feature column names with name lookup
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Build a schema from column names in model order
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            // First occurrence wins on duplicate names
            positions.entry(name.clone()).or_insert(idx);
        }

        if positions.len() != columns.len() {
            debug!(
                "Schema has {} duplicate column names",
                columns.len() - positions.len()
            );
        }

        Ok(Self { columns, positions })
    }

    /// Parse a schema document
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument = serde_json::from_str(json)
            .map_err(|e| SchemaError::InvalidFormat(e.to_string()))?;
        Self::new(doc.data_columns)
    }

    /// Load a schema document from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let schema = Self::from_json_str(&json)?;
        info!("Loaded {} columns from {}", schema.len(), path.display());
        Ok(schema)
    }

    /// Index of a column by exact name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Column names in model order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
