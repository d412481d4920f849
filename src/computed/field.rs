//! Computed field definitions.

use std::fmt;

use crate::document::field_value::FieldValue;
use crate::indexable::Indexable;

/// A named function deriving one field value from an indexable.
///
/// `compute` returns `Ok(None)` when there is nothing to index. Errors are
/// logged by the builder and, in strict mode, fail the document.
pub trait ComputedIndexField: Send + Sync {
    /// Logical field name.
    fn field_name(&self) -> &str;

    /// Declared return type tag, used to name the physical field when set.
    fn return_type(&self) -> Option<&str> {
        None
    }

    /// Compute the value for `indexable`.
    fn compute(&self, indexable: &dyn Indexable) -> anyhow::Result<Option<FieldValue>>;
}

/// Computed field backed by a closure.
///
/// # Examples
///
/// ```
/// use docweaver::computed::{ComputedIndexField, FnComputedField};
/// use docweaver::document::FieldValue;
/// use docweaver::indexable::{Culture, Indexable, MemoryIndexable};
///
/// let field = FnComputedField::new("FieldCount", |item: &dyn Indexable| {
///     Ok(Some(FieldValue::Integer(item.fields().len() as i64)))
/// })
/// .with_return_type("int");
///
/// let item = MemoryIndexable::new("item-1", Culture::new("en")).with_text("Title", "Hello");
/// assert_eq!(field.compute(&item).unwrap(), Some(FieldValue::Integer(1)));
/// assert_eq!(field.return_type(), Some("int"));
/// ```
pub struct FnComputedField<F> {
    field_name: String,
    return_type: Option<String>,
    compute: F,
}

impl<F> FnComputedField<F>
where
    F: Fn(&dyn Indexable) -> anyhow::Result<Option<FieldValue>> + Send + Sync,
{
    /// Create a computed field without a declared return type.
    pub fn new<S: Into<String>>(field_name: S, compute: F) -> Self {
        FnComputedField {
            field_name: field_name.into(),
            return_type: None,
            compute,
        }
    }

    /// Declare the return type tag.
    pub fn with_return_type<S: Into<String>>(mut self, return_type: S) -> Self {
        self.return_type = Some(return_type.into());
        self
    }
}

impl<F> ComputedIndexField for FnComputedField<F>
where
    F: Fn(&dyn Indexable) -> anyhow::Result<Option<FieldValue>> + Send + Sync,
{
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    fn compute(&self, indexable: &dyn Indexable) -> anyhow::Result<Option<FieldValue>> {
        (self.compute)(indexable)
    }
}

impl<F> fmt::Debug for FnComputedField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComputedField")
            .field("field_name", &self.field_name)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}
