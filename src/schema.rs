//! Field policy and field naming collaborators.
//!
//! - [`field_config`] - per-field null/empty substitution, boost and formatting
//! - [`field_map`] - lookup of field configurations by logical name
//! - [`translator`] - logical name + type + culture to physical field name

pub mod field_config;
pub mod field_map;
pub mod translator;

pub use field_config::{
    FieldConfiguration, IndexFieldStorageValueFormatter, SearchFieldConfiguration, ValueFormatter,
};
pub use field_map::{FieldConfigurationRegistry, FieldMap};
pub use translator::{FieldNameTranslator, FieldType, SuffixFieldNameTranslator};
