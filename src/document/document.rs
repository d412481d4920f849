//! Finished index documents and the values stored in them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;

/// A value paired with a strictly positive relevance boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedValue {
    value: FieldValue,
    boost: f32,
}

impl BoostedValue {
    /// Pair a value with a boost. Returns `None` unless `boost > 0`.
    pub fn new(value: FieldValue, boost: f32) -> Option<Self> {
        (boost > 0.0).then_some(BoostedValue { value, boost })
    }

    /// The underlying value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The boost scalar.
    pub fn boost(&self) -> f32 {
        self.boost
    }
}

/// A value as it is stored under one physical field name.
///
/// Only fields with a positive boost are wrapped; everything else is stored
/// as a plain value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredValue {
    /// Plain value.
    Value(FieldValue),
    /// Value annotated with a field boost.
    Boosted(BoostedValue),
}

impl StoredValue {
    /// Store `value` boosted when `boost` is positive, plain otherwise.
    pub fn with_boost(value: FieldValue, boost: Option<f32>) -> Self {
        match boost {
            Some(boost) if boost > 0.0 => StoredValue::Boosted(BoostedValue { value, boost }),
            _ => StoredValue::Value(value),
        }
    }

    /// The underlying value, boosted or not.
    pub fn value(&self) -> &FieldValue {
        match self {
            StoredValue::Value(value) => value,
            StoredValue::Boosted(boosted) => boosted.value(),
        }
    }

    /// The boost, when this value carries one.
    pub fn boost(&self) -> Option<f32> {
        match self {
            StoredValue::Value(_) => None,
            StoredValue::Boosted(boosted) => Some(boosted.boost()),
        }
    }

    /// The text of a text value, boosted or not.
    pub fn as_text(&self) -> Option<&str> {
        self.value().as_text()
    }

    pub(crate) fn text_mut(&mut self) -> Option<&mut String> {
        let value = match self {
            StoredValue::Value(value) => value,
            StoredValue::Boosted(boosted) => &mut boosted.value,
        };
        match value {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<FieldValue> for StoredValue {
    fn from(value: FieldValue) -> Self {
        StoredValue::Value(value)
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Value(value) => write!(f, "{value}"),
            StoredValue::Boosted(boosted) => write!(f, "{}^{}", boosted.value, boosted.boost),
        }
    }
}

/// A finished index document: physical field name to stored value.
///
/// Documents are produced by
/// [`DocumentBuilder`](crate::builder::DocumentBuilder) and handed to the
/// caller for submission. They are never reused across indexables.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Document {
    fields: HashMap<String, StoredValue>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document {
            fields: HashMap::new(),
        }
    }

    /// Get a stored value from the document.
    pub fn get_field(&self, name: &str) -> Option<&StoredValue> {
        self.fields.get(name)
    }

    /// Get the underlying value of a field, ignoring any boost.
    pub fn get_value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(StoredValue::value)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Get all stored fields.
    pub fn fields(&self) -> &HashMap<String, StoredValue> {
        &self.fields
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, StoredValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, StoredValue)>>(iter: I) -> Self {
        Document {
            fields: iter.into_iter().collect(),
        }
    }
}
