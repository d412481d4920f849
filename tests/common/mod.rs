#![allow(dead_code)]

use std::collections::HashMap;

use docweaver::indexable::Culture;
use docweaver::schema::{FieldNameTranslator, FieldType};

/// Translator with a fixed name table; unknown names are lowercased.
/// Names ending in `_da` are culture-qualified.
pub struct TableTranslator {
    names: HashMap<String, String>,
}

impl TableTranslator {
    pub fn new(names: &[(&str, &str)]) -> Self {
        TableTranslator {
            names: names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl FieldNameTranslator for TableTranslator {
    fn index_field_name(
        &self,
        field_name: &str,
        _field_type: FieldType<'_>,
        _culture: &Culture,
    ) -> String {
        self.names
            .get(field_name)
            .cloned()
            .unwrap_or_else(|| field_name.to_lowercase())
    }

    fn has_culture(&self, field_name: &str) -> bool {
        field_name.ends_with("_da")
    }

    fn strip_known_cultures(&self, field_name: &str) -> String {
        field_name.trim_end_matches("_da").to_string()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
