//! In-memory indexable records.

use crate::document::field_value::FieldValue;
use crate::indexable::{Culture, Indexable, IndexableDataField};

/// A data field held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDataField {
    id: String,
    name: String,
    type_key: String,
    value: Option<FieldValue>,
}

impl MemoryDataField {
    /// Create a new field. The id defaults to the name.
    pub fn new<N, T>(name: N, type_key: T, value: Option<FieldValue>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        MemoryDataField {
            id: name.clone(),
            name,
            type_key: type_key.into(),
            value,
        }
    }

    /// Set an explicit field id.
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }
}

impl IndexableDataField for MemoryDataField {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_key(&self) -> &str {
        &self.type_key
    }

    fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }
}

/// An indexable held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryIndexable {
    unique_id: String,
    culture: Culture,
    fields: Vec<MemoryDataField>,
    is_media: bool,
}

impl MemoryIndexable {
    /// Create an indexable with no fields.
    pub fn new<S: Into<String>>(unique_id: S, culture: Culture) -> Self {
        MemoryIndexable {
            unique_id: unique_id.into(),
            culture,
            fields: Vec::new(),
            is_media: false,
        }
    }

    /// Append a data field.
    pub fn with_field(mut self, field: MemoryDataField) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a text field with the given value.
    pub fn with_text<N, V>(self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.with_field(MemoryDataField::new(
            name,
            "single-line text",
            Some(FieldValue::Text(value.into())),
        ))
    }

    /// Mark this record as a media item.
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }
}

impl Indexable for MemoryIndexable {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn culture(&self) -> &Culture {
        &self.culture
    }

    fn fields(&self) -> Vec<&dyn IndexableDataField> {
        self.fields
            .iter()
            .map(|field| field as &dyn IndexableDataField)
            .collect()
    }

    fn is_media(&self) -> bool {
        self.is_media
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_insertion_order() {
        let item = MemoryIndexable::new("item-1", Culture::new("en"))
            .with_text("Title", "Hello")
            .with_field(MemoryDataField::new("Count", "integer", Some(FieldValue::Integer(3))))
            .with_text("Body", "World");

        let names: Vec<_> = item.fields().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["Title", "Count", "Body"]);
        assert_eq!(item.unique_id(), "item-1");
        assert!(!item.is_media());
    }

    #[test]
    fn test_field_id_defaults_to_name() {
        let field = MemoryDataField::new("Title", "text", None);
        assert_eq!(field.id(), "Title");
        assert_eq!(field.with_id("{A1}").id(), "{A1}");
    }
}
