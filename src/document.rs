//! Index document model.
//!
//! This module provides the values and containers the builder writes into:
//!
//! - [`field_value::FieldValue`] - typed values with a string form and a runtime kind
//! - [`document::StoredValue`] / [`document::BoostedValue`] - plain or boost-annotated values
//! - [`store::DocumentStore`] - the concurrent map a build writes into
//! - [`document::Document`] - the finished mapping handed to the caller
//!
//! # Examples
//!
//! ```
//! use docweaver::document::{DocumentStore, FieldValue, StoredValue};
//!
//! let store = DocumentStore::new();
//! store.add_if_absent("title_t", StoredValue::from(FieldValue::from("Rust")));
//! store.add_if_absent("title_t", StoredValue::from(FieldValue::from("Ignored")));
//!
//! let doc = store.into_document();
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.get_value("title_t"), Some(&FieldValue::from("Rust")));
//! ```

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;
pub mod store;

pub use document::{BoostedValue, Document, StoredValue};
pub use field_value::{FieldValue, ListKind, ValueKind};
pub use store::DocumentStore;
