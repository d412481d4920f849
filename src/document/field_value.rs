//! Field value types for index documents.
//!
//! This module defines the [`FieldValue`] enum which represents every value
//! that can be written into an index document, and [`ValueKind`], the runtime
//! type classification the field name translator uses to choose a physical
//! field name.
//!
//! Null is never a variant: an absent value is `Option::None` throughout the
//! builder, so suppression of nulls is visible in signatures.
//!
//! # String form
//!
//! Every value has a string form (its [`Display`](std::fmt::Display)
//! output). The builder suppresses any value whose string form is empty:
//!
//! ```
//! use docweaver::document::field_value::FieldValue;
//!
//! assert!(FieldValue::Text(String::new()).is_empty());
//! assert!(FieldValue::List(vec![]).is_empty());
//! assert!(!FieldValue::Integer(0).is_empty());
//!
//! let tags = FieldValue::List(vec!["red".into(), "blue".into()]);
//! assert_eq!(tags.to_string(), "red blue");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime type classification of a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Text value.
    Text,
    /// Integer value (i64).
    Integer,
    /// Floating point value (f64).
    Float,
    /// Boolean value.
    Boolean,
    /// UTC timestamp.
    DateTime,
    /// Raw bytes.
    Binary,
    /// Sequence of values; carries the kind of its first element.
    List(Option<ListKind>),
}

/// Element kind of a list value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Text,
    Integer,
    Float,
    Boolean,
    DateTime,
    Binary,
    Nested,
}

/// Represents a value for a field in an index document.
///
/// # Examples
///
/// ```
/// use docweaver::document::field_value::{FieldValue, ValueKind};
///
/// let title = FieldValue::from("Rust Programming");
/// let year = FieldValue::Integer(2024);
///
/// assert_eq!(title.kind(), ValueKind::Text);
/// assert_eq!(year.as_text(), None);
/// assert_eq!(year.to_string(), "2024");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// DateTime value
    DateTime(chrono::DateTime<chrono::Utc>),
    /// Binary data
    Binary(Vec<u8>),
    /// Multi-valued field
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// The runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::DateTime(_) => ValueKind::DateTime,
            FieldValue::Binary(_) => ValueKind::Binary,
            FieldValue::List(items) => ValueKind::List(items.first().map(|first| match first {
                FieldValue::Text(_) => ListKind::Text,
                FieldValue::Integer(_) => ListKind::Integer,
                FieldValue::Float(_) => ListKind::Float,
                FieldValue::Boolean(_) => ListKind::Boolean,
                FieldValue::DateTime(_) => ListKind::DateTime,
                FieldValue::Binary(_) => ListKind::Binary,
                FieldValue::List(_) => ListKind::Nested,
            })),
        }
    }

    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the items of a list value.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Number of items for list values, `None` for scalars.
    pub fn item_count(&self) -> Option<usize> {
        self.as_list().map(<[FieldValue]>::len)
    }

    /// True when the string form of this value is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Binary(bytes) => bytes.is_empty(),
            FieldValue::List(items) => items.iter().all(FieldValue::is_empty),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            FieldValue::Binary(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            FieldValue::List(items) => {
                let mut first = true;
                for item in items.iter().filter(|item| !item.is_empty()) {
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for FieldValue {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}
