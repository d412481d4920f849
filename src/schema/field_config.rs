//! Per-field indexing policy.
//!
//! A [`FieldConfiguration`] tells the builder what to substitute for null and
//! empty values, how much to boost a field, and how to format values before
//! they are written. Every capability has a neutral default so a registry
//! can return partial configurations.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;

/// Policy for a single logical field.
pub trait FieldConfiguration: Send + Sync {
    /// Value to index when the field is null.
    fn null_value(&self) -> Option<&FieldValue> {
        None
    }

    /// Text to index when the field is the empty string.
    fn empty_string_value(&self) -> Option<&str> {
        None
    }

    /// Static boost added to the resolved field boost.
    fn boost(&self) -> f32 {
        0.0
    }

    /// Format a value before it is written.
    fn format(&self, value: Option<FieldValue>) -> Option<FieldValue> {
        value
    }
}

/// Transforms a field value before it is written.
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: Option<FieldValue>) -> Option<FieldValue>;
}

impl<F> ValueFormatter for F
where
    F: Fn(Option<FieldValue>) -> Option<FieldValue> + Send + Sync,
{
    fn format(&self, value: Option<FieldValue>) -> Option<FieldValue> {
        self(value)
    }
}

/// Index-wide formatter applied to every value right before it is stored.
///
/// Receives the untranslated field name.
pub trait IndexFieldStorageValueFormatter: Send + Sync {
    fn format_for_storage(&self, value: FieldValue, field_name: &str) -> FieldValue;
}

impl<F> IndexFieldStorageValueFormatter for F
where
    F: Fn(FieldValue, &str) -> FieldValue + Send + Sync,
{
    fn format_for_storage(&self, value: FieldValue, field_name: &str) -> FieldValue {
        self(value, field_name)
    }
}

/// Serializable field configuration.
///
/// # Examples
///
/// ```
/// use docweaver::schema::field_config::{FieldConfiguration, SearchFieldConfiguration};
///
/// let config = SearchFieldConfiguration::new()
///     .with_empty_string_value("N/A")
///     .with_boost(1.5);
///
/// assert_eq!(config.empty_string_value(), Some("N/A"));
/// assert_eq!(config.boost(), 1.5);
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFieldConfiguration {
    /// Substitute for null values.
    pub null_value: Option<FieldValue>,

    /// Substitute for empty strings.
    pub empty_string_value: Option<String>,

    /// Static field boost.
    pub boost: f32,

    #[serde(skip)]
    formatter: Option<Arc<dyn ValueFormatter>>,
}

impl SearchFieldConfiguration {
    /// Create a configuration without any policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the null substitute.
    pub fn with_null_value<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.null_value = Some(value.into());
        self
    }

    /// Set the empty string substitute.
    pub fn with_empty_string_value<S: Into<String>>(mut self, value: S) -> Self {
        self.empty_string_value = Some(value.into());
        self
    }

    /// Set the static boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Set the value formatter.
    pub fn with_formatter<F: ValueFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }
}

impl FieldConfiguration for SearchFieldConfiguration {
    fn null_value(&self) -> Option<&FieldValue> {
        self.null_value.as_ref()
    }

    fn empty_string_value(&self) -> Option<&str> {
        self.empty_string_value.as_deref()
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn format(&self, value: Option<FieldValue>) -> Option<FieldValue> {
        match &self.formatter {
            Some(formatter) => formatter.format(value),
            None => value,
        }
    }
}

impl fmt::Debug for SearchFieldConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFieldConfiguration")
            .field("null_value", &self.null_value)
            .field("empty_string_value", &self.empty_string_value)
            .field("boost", &self.boost)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        let config = SearchFieldConfiguration::new();
        assert_eq!(config.null_value(), None);
        assert_eq!(config.empty_string_value(), None);
        assert_eq!(config.boost(), 0.0);
        assert_eq!(
            config.format(Some(FieldValue::from("x"))),
            Some(FieldValue::from("x"))
        );
    }

    #[test]
    fn test_formatter_is_applied() {
        let config = SearchFieldConfiguration::new().with_formatter(|value: Option<FieldValue>| {
            value.map(|v| FieldValue::Text(v.to_string().to_uppercase()))
        });
        assert_eq!(
            config.format(Some(FieldValue::from("abc"))),
            Some(FieldValue::from("ABC"))
        );
        assert_eq!(config.format(None), None);
    }

    #[test]
    fn test_deserialize_partial_configuration() {
        let config: SearchFieldConfiguration =
            serde_json::from_str(r#"{"empty_string_value": "N/A", "boost": 2.0}"#).unwrap();
        assert_eq!(config.empty_string_value(), Some("N/A"));
        assert_eq!(config.boost(), 2.0);
        assert!(config.null_value().is_none());
    }
}
