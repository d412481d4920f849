//! # Docweaver
//!
//! Builds search index documents from content records.
//!
//! Given one [`Indexable`](indexable::Indexable) and an
//! [`IndexContext`](builder::IndexContext), the
//! [`DocumentBuilder`](builder::DocumentBuilder) produces one
//! [`Document`](document::Document): a map from physical field name to typed
//! value, ready for a search backend.
//!
//! ## Features
//!
//! - Type and culture aware field name translation with culture-neutral aliases
//! - Item and field boosting
//! - Null and empty value substitution and suppression
//! - Aggregated full-text content field
//! - Computed fields, evaluated sequentially or on a worker pool
//! - Strict mode with fail-fast or aggregated error reporting

pub mod boosting;
pub mod builder;
pub mod computed;
pub mod config;
pub mod document;
pub mod error;
pub mod indexable;
pub mod language_fallback;
pub mod schema;

pub mod prelude {
    pub use crate::builder::{CONTENT_FIELD, DOCUMENT_BOOST_FIELD, DocumentBuilder, IndexContext};
    pub use crate::computed::{ComputedIndexField, FnComputedField};
    pub use crate::config::{BuilderSettings, ParallelOptions};
    pub use crate::document::{Document, FieldValue, StoredValue};
    pub use crate::error::{DocweaverError, FieldComputationError, Result};
    pub use crate::indexable::{
        Culture, Indexable, IndexableDataField, MemoryDataField, MemoryIndexable,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
