//! Thread-safe document store written by one build.
//!
//! The store is the only state shared between computed field workers. It
//! exposes exactly two writes, add-if-absent and text append, and takes its
//! own lock for each; callers never lock around it.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::document::document::{Document, StoredValue};

/// Concurrent field map backing a document under construction.
#[derive(Debug, Default)]
pub struct DocumentStore {
    fields: RwLock<AHashMap<String, StoredValue>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        DocumentStore {
            fields: RwLock::new(AHashMap::new()),
        }
    }

    /// Insert `value` under `key` unless the key is already present.
    ///
    /// Returns `false` without touching the store when the key exists.
    pub fn add_if_absent(&self, key: &str, value: StoredValue) -> bool {
        let mut fields = self.fields.write();
        if fields.contains_key(key) {
            return false;
        }
        fields.insert(key.to_string(), value);
        true
    }

    /// Append `text` to the existing text value under `key`, separated by a
    /// single space. A boosted value keeps its boost.
    ///
    /// Returns `false` when the key is missing or its value is not text.
    pub fn append_text(&self, key: &str, text: &str) -> bool {
        let mut fields = self.fields.write();
        match fields.get_mut(key).and_then(StoredValue::text_mut) {
            Some(existing) => {
                existing.reserve(text.len() + 1);
                existing.push(' ');
                existing.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    /// Finish the build, handing the fields over as a [`Document`].
    pub fn into_document(self) -> Document {
        self.fields.into_inner().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::document::field_value::FieldValue;

    fn text(value: &str) -> StoredValue {
        StoredValue::Value(FieldValue::from(value))
    }

    #[test]
    fn test_add_if_absent_keeps_first_value() {
        let store = DocumentStore::new();
        assert!(store.add_if_absent("title", text("first")));
        assert!(!store.add_if_absent("title", text("second")));

        let doc = store.into_document();
        assert_eq!(doc.get_field("title"), Some(&text("first")));
    }

    #[test]
    fn test_append_joins_with_single_space() {
        let store = DocumentStore::new();
        store.add_if_absent("_content", text("hello"));
        assert!(store.append_text("_content", "world"));

        let doc = store.into_document();
        assert_eq!(doc.get_field("_content"), Some(&text("hello world")));
    }

    #[test]
    fn test_append_requires_existing_text() {
        let store = DocumentStore::new();
        assert!(!store.append_text("missing", "x"));

        store.add_if_absent("count", StoredValue::Value(FieldValue::Integer(3)));
        assert!(!store.append_text("count", "x"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_keeps_boost() {
        let store = DocumentStore::new();
        store.add_if_absent(
            "keywords",
            StoredValue::with_boost(FieldValue::from("a"), Some(2.0)),
        );
        assert!(store.append_text("keywords", "b"));

        let doc = store.into_document();
        let stored = doc.get_field("keywords").unwrap();
        assert_eq!(stored.as_text(), Some("a b"));
        assert_eq!(stored.boost(), Some(2.0));
    }

    #[test]
    fn test_concurrent_add_if_absent_has_single_winner() {
        let store = Arc::new(DocumentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add_if_absent("key", text(&i.to_string())))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(DocumentStore::new());
        store.add_if_absent("_content", text("start"));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.append_text("_content", "w"))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        let store = Arc::try_unwrap(store).unwrap();
        let doc = store.into_document();
        let content = doc.get_field("_content").and_then(StoredValue::as_text).unwrap();
        assert_eq!(content.split(' ').count(), 17);
    }
}
