//! Source content records consumed by the document builder.
//!
//! An [`Indexable`] is one content record: a unique id, a culture, and an
//! ordered set of typed data fields. The builder only ever reads from it, and
//! computed field workers read it concurrently, so implementations must be
//! `Send + Sync`.

pub mod memory;
pub mod reader;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;

pub use memory::{MemoryDataField, MemoryIndexable};
pub use reader::{FieldReader, RawValueReader, is_text_field};

/// A culture such as `da-DK` or `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Culture {
    name: String,
}

impl Culture {
    /// Create a culture from its name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Culture { name: name.into() }
    }

    /// The full culture name, e.g. `da-DK`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lowercase two-letter language of this culture, e.g. `da`.
    pub fn two_letter_language(&self) -> String {
        self.name
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Whether `default_language` belongs to the same language as this culture.
    ///
    /// The invariant culture (empty name) counts as the default language, so
    /// its fields never get a culture-neutral alias.
    pub fn is_default_language(&self, default_language: &str) -> bool {
        default_language
            .to_ascii_lowercase()
            .starts_with(&self.two_letter_language())
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Culture {
    fn from(name: &str) -> Self {
        Culture::new(name)
    }
}

/// One named, typed data field of an indexable.
pub trait IndexableDataField: Send + Sync {
    /// Stable identifier of the field.
    fn id(&self) -> &str;

    /// Logical field name.
    fn name(&self) -> &str;

    /// Declared type key, e.g. `single-line text` or `integer`.
    fn type_key(&self) -> &str;

    /// Raw value, `None` when the field holds nothing.
    fn value(&self) -> Option<&FieldValue>;
}

/// A content record the builder turns into one document.
pub trait Indexable: Send + Sync {
    /// Unique identifier used in log messages and errors.
    fn unique_id(&self) -> &str;

    /// Culture of this record.
    fn culture(&self) -> &Culture;

    /// Stored data fields, in enumeration order.
    fn fields(&self) -> Vec<&dyn IndexableDataField>;

    /// Media records do not feed the aggregated content field.
    fn is_media(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_letter_language() {
        assert_eq!(Culture::new("da-DK").two_letter_language(), "da");
        assert_eq!(Culture::new("EN").two_letter_language(), "en");
        assert_eq!(Culture::new("pt_BR").two_letter_language(), "pt");
    }

    #[test]
    fn test_default_language_match() {
        assert!(Culture::new("en-US").is_default_language("en"));
        assert!(Culture::new("en").is_default_language("en-GB"));
        assert!(!Culture::new("da-DK").is_default_language("en"));
    }

    #[test]
    fn test_invariant_culture_is_default_language() {
        assert!(Culture::new("").is_default_language("en"));
        assert!(Culture::new("").is_default_language("da"));
    }
}
