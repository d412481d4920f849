//! Field configuration lookup by logical field name.

use std::collections::HashMap;
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::error::Result;
use crate::schema::field_config::{FieldConfiguration, SearchFieldConfiguration};

/// Source of per-field configuration.
///
/// A missing configuration is not an error; it means "no special policy".
pub trait FieldConfigurationRegistry: Send + Sync {
    fn field_configuration(&self, field_name: &str) -> Option<&dyn FieldConfiguration>;
}

#[derive(Deserialize)]
struct FieldMapFile {
    #[serde(default)]
    fields: HashMap<String, SearchFieldConfiguration>,
}

/// Case-insensitive map of field configurations.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: AHashMap<String, SearchFieldConfiguration>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the configuration of one field, replacing any previous one.
    pub fn add<S: AsRef<str>>(&mut self, field_name: S, config: SearchFieldConfiguration) {
        self.fields
            .insert(field_name.as_ref().to_lowercase(), config);
    }

    /// Builder-style variant of [`FieldMap::add`].
    pub fn with_field<S: AsRef<str>>(
        mut self,
        field_name: S,
        config: SearchFieldConfiguration,
    ) -> Self {
        self.add(field_name, config);
        self
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a field map from JSON of the form `{"fields": {"Name": {...}}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: FieldMapFile = serde_json::from_str(json)?;
        Ok(file
            .fields
            .into_iter()
            .fold(FieldMap::new(), |map, (name, config)| map.with_field(name, config)))
    }

    /// Load a field map from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl FieldConfigurationRegistry for FieldMap {
    fn field_configuration(&self, field_name: &str) -> Option<&dyn FieldConfiguration> {
        self.fields
            .get(&field_name.to_lowercase())
            .map(|config| config as &dyn FieldConfiguration)
    }
}
