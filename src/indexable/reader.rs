//! Reading raw values out of data fields.

use crate::document::field_value::FieldValue;
use crate::indexable::IndexableDataField;

/// Type keys whose values are aggregated into the content field.
const TEXT_TYPE_KEYS: &[&str] = &[
    "text",
    "single-line text",
    "multi-line text",
    "rich text",
    "html",
    "memo",
    "word document",
];

/// Whether a field with this type key holds full-text content.
pub fn is_text_field(type_key: &str) -> bool {
    TEXT_TYPE_KEYS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(type_key.trim()))
}

/// Turns a data field into the value the builder indexes.
pub trait FieldReader: Send + Sync {
    /// Read the field's value, `None` for null.
    fn read(&self, field: &dyn IndexableDataField) -> Option<FieldValue>;
}

/// Reader that returns the field's raw value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawValueReader;

impl FieldReader for RawValueReader {
    fn read(&self, field: &dyn IndexableDataField) -> Option<FieldValue> {
        field.value().cloned()
    }
}
