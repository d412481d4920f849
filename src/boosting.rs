//! Relevance boost resolution.
//!
//! How boosts are decided is up to the resolver; the builder only consumes
//! the resulting scalars. A non-positive boost means "no boost".

use ahash::AHashMap;

use crate::indexable::{Indexable, IndexableDataField};

/// Resolves item-level and field-level boosts.
pub trait BoostResolver: Send + Sync {
    /// Boost for the whole document.
    fn item_boost(&self, indexable: &dyn Indexable) -> f32;

    /// Boost for one stored field.
    fn field_boost(&self, field: &dyn IndexableDataField) -> f32;
}

/// Resolver that never boosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBoosting;

impl BoostResolver for NoBoosting {
    fn item_boost(&self, _indexable: &dyn Indexable) -> f32 {
        0.0
    }

    fn field_boost(&self, _field: &dyn IndexableDataField) -> f32 {
        0.0
    }
}

/// Resolver backed by fixed tables keyed by indexable id and field name.
#[derive(Debug, Clone, Default)]
pub struct StaticBoostResolver {
    items: AHashMap<String, f32>,
    fields: AHashMap<String, f32>,
}

impl StaticBoostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boost the document of the indexable with this id.
    pub fn with_item_boost<S: Into<String>>(mut self, unique_id: S, boost: f32) -> Self {
        self.items.insert(unique_id.into(), boost);
        self
    }

    /// Boost every stored field with this name (case-insensitive).
    pub fn with_field_boost<S: AsRef<str>>(mut self, field_name: S, boost: f32) -> Self {
        self.fields.insert(field_name.as_ref().to_lowercase(), boost);
        self
    }
}

impl BoostResolver for StaticBoostResolver {
    fn item_boost(&self, indexable: &dyn Indexable) -> f32 {
        self.items
            .get(indexable.unique_id())
            .copied()
            .unwrap_or_default()
    }

    fn field_boost(&self, field: &dyn IndexableDataField) -> f32 {
        self.fields
            .get(&field.name().to_lowercase())
            .copied()
            .unwrap_or_default()
    }
}
