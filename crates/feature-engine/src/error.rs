//! Feature Engine Error Types

use thiserror::Error;

/// Errors while loading the column schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema document is not valid JSON or lacks `data_columns`
    #[error("Invalid schema document: {0}")]
    InvalidFormat(String),

    /// Schema has no columns
    #[error("Schema contains no columns")]
    Empty,
}

/// Errors while encoding car attributes into a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Numeric field holds a value that cannot be read as a float
    #[error("could not convert {field} value {value} to float")]
    NotNumeric { field: &'static str, value: String },

    /// Numeric field was supplied but the schema has no column for it
    #[error("column '{0}' is not in the schema")]
    MissingColumn(&'static str),

    /// Categorical value has no one-hot column (strict mode only)
    #[error("unknown {field} '{value}': column '{column}' is not in the schema")]
    UnknownCategory {
        field: &'static str,
        value: String,
        column: String,
    },
}
