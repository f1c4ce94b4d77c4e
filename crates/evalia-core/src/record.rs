use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fields::{Field, FieldKind};

/// A primitive value captured by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Canonical textual form used by the report.
    ///
    /// Floats always carry a fractional part (`94.0`, `1.6`).
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(true) => "Sí".to_string(),
            FieldValue::Bool(false) => "No".to_string(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Float(x) => {
                let s = x.to_string();
                if x.is_finite() && !s.contains('.') {
                    format!("{s}.0")
                } else {
                    s
                }
            }
            FieldValue::Text(s) => s.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// The accumulated intake record for one evaluation.
///
/// A flat map from field key to primitive value. Keys are only ever added or
/// overwritten; unknown keys are kept but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of field keys to primitives.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    /// Set a value by raw key. Unknown keys are retained as-is.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(field.key())
    }

    pub fn get_key(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Display text of a field, empty when absent.
    pub fn text(&self, field: Field) -> String {
        self.get(field)
            .map(FieldValue::to_display_string)
            .unwrap_or_default()
    }

    /// Overwrite every given field, keeping everything else.
    pub fn merge<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<FieldValue>,
    {
        for (field, value) in values {
            self.set(field, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Default-fill: every known field mapped to its display string.
    ///
    /// Absent and null fields become the empty string. The record itself is
    /// left untouched.
    pub fn complete(&self) -> CompletedRecord {
        let values = Field::all().map(|field| (field, self.text(field))).collect();
        CompletedRecord { values }
    }
}

/// A record where every known field has a textual value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRecord {
    values: BTreeMap<Field, String>,
}

impl CompletedRecord {
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// The value followed by its unit, for numeric-with-unit fields.
    ///
    /// Other kinds are returned unchanged.
    pub fn with_unit(&self, field: Field) -> String {
        match field.kind() {
            FieldKind::NumericWithUnit { unit } => format!("{} {unit}", self.get(field)),
            _ => self.get(field).to_string(),
        }
    }

    pub fn replace(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}
