//! Car Attributes
//!
//! The request payload as sent by the front-end: a JSON object keyed by the
//! display field names (`Make`, `Engine Size`, ...). Kept as a loose map so
//! that unknown keys, missing keys and oddly-typed values reach the encoder
//! unchanged.

use crate::error::EncodeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw car attributes keyed by request field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarAttributes {
    fields: Map<String, Value>,
}

impl CarAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to an arbitrary JSON value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_make(self, make: &str) -> Self {
        self.with("Make", make)
    }

    pub fn with_model(self, model: &str) -> Self {
        self.with("Model", model)
    }

    pub fn with_condition(self, condition: &str) -> Self {
        self.with("Condition", condition)
    }

    pub fn with_age(self, age: f64) -> Self {
        self.with("Age", age)
    }

    pub fn with_engine_size(self, engine_size: f64) -> Self {
        self.with("Engine Size", engine_size)
    }

    pub fn with_horse_power(self, horse_power: f64) -> Self {
        self.with("Horse Power", horse_power)
    }

    /// Remove a field
    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    /// Whether the request carries the key at all (even as `null`)
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Read a numeric field.
    ///
    /// Returns `Ok(None)` when the key is absent. Numbers, numeric strings
    /// and booleans are accepted; anything else present under the key is an
    /// error, `null` included.
    pub fn numeric(&self, key: &'static str) -> Result<Option<f64>, EncodeError> {
        let Some(value) = self.fields.get(key) else {
            return Ok(None);
        };

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        };

        parsed.map(Some).ok_or_else(|| EncodeError::NotNumeric {
            field: key,
            value: value.to_string(),
        })
    }

    /// Read a categorical field as text.
    ///
    /// Strings are returned verbatim, numbers rendered as text and booleans
    /// as `True`/`False`, the spelling the training columns use.
    /// Absent keys, `null` and structured values yield `None`.
    pub fn category(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for CarAttributes {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_request_body() {
        let attrs: CarAttributes = serde_json::from_value(json!({
            "Make": "toyota",
            "Age": 3,
            "Engine Size": "1.8",
        }))
        .unwrap();

        assert_eq!(attrs.category("Make").as_deref(), Some("toyota"));
        assert_eq!(attrs.numeric("Age").unwrap(), Some(3.0));
        assert_eq!(attrs.numeric("Engine Size").unwrap(), Some(1.8));
        assert_eq!(attrs.numeric("Horse Power").unwrap(), None);
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let attrs = CarAttributes::new().with("Age", "three");
        let err = attrs.numeric("Age").unwrap_err();
        assert_eq!(
            err,
            EncodeError::NotNumeric {
                field: "Age",
                value: "\"three\"".to_string(),
            }
        );
    }

    #[test]
    fn test_null_numeric_rejected() {
        let attrs = CarAttributes::new().with("Horse Power", Value::Null);
        assert!(attrs.numeric("Horse Power").is_err());
    }

    #[test]
    fn test_boolean_numeric() {
        let attrs = CarAttributes::new().with("Age", true);
        assert_eq!(attrs.numeric("Age").unwrap(), Some(1.0));
    }

    #[test]
    fn test_category_rendering() {
        let attrs = CarAttributes::new()
            .with("Model", 308)
            .with("Make", Value::Null);

        assert_eq!(attrs.category("Model").as_deref(), Some("308"));
        assert_eq!(attrs.category("Make"), None);
        assert_eq!(attrs.category("Condition"), None);
    }

    #[test]
    fn test_boolean_category_capitalised() {
        let attrs = CarAttributes::new().with("Make", true).with("Model", false);
        assert_eq!(attrs.category("Make").as_deref(), Some("True"));
        assert_eq!(attrs.category("Model").as_deref(), Some("False"));
    }
}
