// src/model/schema.rs

use crate::errors::ServerError;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

/// The ordered list of feature names the regression model was fitted on,
/// persisted next to the model artifact. Both the training-prep output and
/// every inference-time vector must follow this order exactly; a silent
/// mismatch would produce a wrong prediction rather than an error.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnSchema {
    pub fn from_columns(columns: Vec<String>) -> Self {
        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { columns, positions }
    }

    /// Load the persisted schema (a JSON array of column names).
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let file = File::open(path)
            .map_err(|e| ServerError::DataError(format!("Failed to open {path}: {e}")))?;
        let columns: Vec<String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ServerError::DataError(format!("Bad column schema in {path}: {e}")))?;
        if columns.is_empty() {
            return Err(ServerError::DataError(format!("Empty column schema in {path}")));
        }
        Ok(Self::from_columns(columns))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Startup check: every column in `required` must exist. Catches schema
    /// drift at load time instead of letting a renamed column silently
    /// leave a zero in the feature vector.
    pub fn ensure_columns(&self, required: &[&str]) -> Result<(), ServerError> {
        let missing: Vec<&str> = required
            .iter()
            .filter(|c| !self.positions.contains_key(**c))
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ServerError::DataError(format!(
                "Column schema is missing translator targets: {}",
                missing.join(", ")
            )))
        }
    }
}

/// One model-ready row, shaped by the schema and zero-filled on creation so
/// the output is structurally correct regardless of schema evolution.
#[derive(Debug)]
pub struct FeatureVector<'a> {
    schema: &'a ColumnSchema,
    values: Vec<f64>,
}

impl<'a> FeatureVector<'a> {
    pub fn zeroed(schema: &'a ColumnSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.len()],
        }
    }

    /// Set a column that must exist (verified at startup for all fixed
    /// translator targets).
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ServerError> {
        match self.schema.position(name) {
            Some(pos) => {
                self.values[pos] = value;
                Ok(())
            }
            None => Err(ServerError::DataError(format!(
                "Column {name} missing from model schema"
            ))),
        }
    }

    /// Set a column only if the schema carries it. One-hot indicators use
    /// this: the dropped reference category has no column, and setting
    /// nothing is the correct encoding for it.
    pub fn set_if_present(&mut self, name: &str, value: f64) {
        if let Some(pos) = self.schema.position(name) {
            self.values[pos] = value;
        }
    }

    /// The row in exact schema order.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ColumnSchema {
        ColumnSchema::from_columns(vec![
            "latitude".to_string(),
            "longitude".to_string(),
            "accommodates".to_string(),
        ])
    }

    #[test]
    fn positions_follow_declaration_order() {
        let s = schema();
        assert_eq!(s.position("latitude"), Some(0));
        assert_eq!(s.position("accommodates"), Some(2));
        assert_eq!(s.position("price"), None);
    }

    #[test]
    fn ensure_columns_reports_every_missing_target() {
        let s = schema();
        assert!(s.ensure_columns(&["latitude", "longitude"]).is_ok());
        let err = s.ensure_columns(&["latitude", "bedrooms", "beds"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bedrooms") && msg.contains("beds"));
    }

    #[test]
    fn vector_starts_zeroed_and_keeps_schema_order() {
        let s = schema();
        let mut v = FeatureVector::zeroed(&s);
        v.set("accommodates", 4.0).unwrap();
        v.set_if_present("room_type_Private room", 1.0); // not in schema, ignored
        assert_eq!(v.into_values(), vec![0.0, 0.0, 4.0]);
    }

    #[test]
    fn setting_an_unknown_fixed_column_is_an_error() {
        let s = schema();
        let mut v = FeatureVector::zeroed(&s);
        assert!(v.set("bedrooms", 2.0).is_err());
    }
}
