//! Document building.
//!
//! [`DocumentBuilder`] turns one [`Indexable`] into one [`Document`]. It is
//! created per indexable by [`DocumentBuilder::build_document`], which runs
//! the stages in order:
//!
//! 1. item boost (`_documentBoost`)
//! 2. stored fields, in the indexable's enumeration order
//! 3. computed fields, with the strategy of the [`IndexContext`]
//!
//! Every write goes through the same path: null/empty substitution and
//! suppression, boost resolution, field name translation, then an
//! add-if-absent or append into the [`DocumentStore`].
//!
//! # Examples
//!
//! ```
//! use docweaver::builder::{DocumentBuilder, IndexContext, CONTENT_FIELD};
//! use docweaver::config::BuilderSettings;
//! use docweaver::document::FieldValue;
//! use docweaver::indexable::{Culture, MemoryIndexable};
//!
//! let context = IndexContext::new(BuilderSettings::default()).unwrap();
//! let item = MemoryIndexable::new("item-1", Culture::new("en"))
//!     .with_text("Title", "Hello")
//!     .with_text("Body", "World");
//!
//! let doc = DocumentBuilder::build_document(&item, &context).unwrap();
//! assert_eq!(doc.get_value("title_t_en"), Some(&FieldValue::from("Hello")));
//! assert_eq!(doc.get_value(CONTENT_FIELD), Some(&FieldValue::from("Hello World")));
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use tracing::{Level, debug, trace, warn};

use crate::boosting::{BoostResolver, NoBoosting};
use crate::computed::{
    ComputedFieldStrategy, ComputedIndexField, ParallelStrategy, SequentialStrategy,
};
use crate::config::BuilderSettings;
use crate::document::{Document, DocumentStore, FieldValue, StoredValue};
use crate::error::{FieldComputationError, Result};
use crate::indexable::{
    Culture, FieldReader, Indexable, IndexableDataField, RawValueReader, is_text_field,
};
use crate::language_fallback::LanguageFallbackSwitcher;
use crate::schema::{
    FieldConfiguration, FieldConfigurationRegistry, FieldMap, FieldNameTranslator, FieldType,
    IndexFieldStorageValueFormatter, SuffixFieldNameTranslator,
};

/// Reserved key holding the item boost.
pub const DOCUMENT_BOOST_FIELD: &str = "_documentBoost";

/// Reserved key aggregating the text of all text fields.
pub const CONTENT_FIELD: &str = "_content";

/// Everything a build needs besides the indexable itself.
///
/// A context is created once per index and shared by every build; the
/// computed field strategy (and its worker pool) is chosen when the context
/// is created.
pub struct IndexContext {
    settings: BuilderSettings,
    field_map: Arc<dyn FieldConfigurationRegistry>,
    translator: Arc<dyn FieldNameTranslator>,
    boosting: Arc<dyn BoostResolver>,
    field_reader: Arc<dyn FieldReader>,
    storage_formatter: Option<Arc<dyn IndexFieldStorageValueFormatter>>,
    computed_fields: Vec<Arc<dyn ComputedIndexField>>,
    schema_fields: AHashSet<String>,
    strategy: Arc<dyn ComputedFieldStrategy>,
}

impl IndexContext {
    /// Create a context with default collaborators.
    ///
    /// Fails only when a worker pool is requested and cannot be created.
    pub fn new(settings: BuilderSettings) -> Result<Self> {
        let strategy: Arc<dyn ComputedFieldStrategy> = if settings.parallel_computed_fields {
            Arc::new(ParallelStrategy::new(&settings.parallel)?)
        } else {
            Arc::new(SequentialStrategy)
        };

        Ok(Self {
            settings,
            field_map: Arc::new(FieldMap::new()),
            translator: Arc::new(SuffixFieldNameTranslator::new()),
            boosting: Arc::new(NoBoosting),
            field_reader: Arc::new(RawValueReader),
            storage_formatter: None,
            computed_fields: Vec::new(),
            schema_fields: AHashSet::new(),
            strategy,
        })
    }

    /// Use a field configuration registry.
    pub fn with_field_map<R: FieldConfigurationRegistry + 'static>(mut self, field_map: R) -> Self {
        self.field_map = Arc::new(field_map);
        self
    }

    /// Use a field name translator.
    pub fn with_translator<T: FieldNameTranslator + 'static>(mut self, translator: T) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Use a boost resolver.
    pub fn with_boosting<B: BoostResolver + 'static>(mut self, boosting: B) -> Self {
        self.boosting = Arc::new(boosting);
        self
    }

    /// Use a field value reader.
    pub fn with_field_reader<F: FieldReader + 'static>(mut self, reader: F) -> Self {
        self.field_reader = Arc::new(reader);
        self
    }

    /// Format every value right before it is stored.
    pub fn with_storage_formatter<F: IndexFieldStorageValueFormatter + 'static>(
        mut self,
        formatter: F,
    ) -> Self {
        self.storage_formatter = Some(Arc::new(formatter));
        self
    }

    /// Add a computed field definition.
    pub fn with_computed_field<C: ComputedIndexField + 'static>(mut self, field: C) -> Self {
        self.computed_fields.push(Arc::new(field));
        self
    }

    /// Add a shared computed field definition.
    pub fn with_shared_computed_field(mut self, field: Arc<dyn ComputedIndexField>) -> Self {
        self.computed_fields.push(field);
        self
    }

    /// Declare the field names the target schema already knows.
    pub fn with_schema_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.schema_fields
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Settings of this context.
    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Configured computed fields, in declaration order.
    pub fn computed_fields(&self) -> &[Arc<dyn ComputedIndexField>] {
        &self.computed_fields
    }

    /// Name of the computed field strategy in use.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Whether the target schema declares this field.
    pub fn is_schema_field(&self, field_name: &str) -> bool {
        self.schema_fields.contains(&field_name.to_lowercase())
    }
}

impl std::fmt::Debug for IndexContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexContext")
            .field("settings", &self.settings)
            .field("computed_fields", &self.computed_fields.len())
            .field("schema_fields", &self.schema_fields.len())
            .field("strategy", &self.strategy.name())
            .finish_non_exhaustive()
    }
}

/// Builds the document of one indexable.
pub struct DocumentBuilder<'a> {
    indexable: &'a dyn Indexable,
    context: &'a IndexContext,
    document: DocumentStore,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder with an empty document.
    pub fn new(indexable: &'a dyn Indexable, context: &'a IndexContext) -> Self {
        DocumentBuilder {
            indexable,
            context,
            document: DocumentStore::new(),
        }
    }

    /// Build the complete document of `indexable`.
    ///
    /// In strict mode a failing computed field fails the whole build and no
    /// partial document is returned.
    pub fn build_document(
        indexable: &'a dyn Indexable,
        context: &'a IndexContext,
    ) -> Result<Document> {
        let builder = DocumentBuilder::new(indexable, context);
        builder.add_boost();
        for field in indexable.fields() {
            builder.add_field(field);
        }
        builder.add_computed_index_fields()?;
        Ok(builder.into_document())
    }

    fn culture(&self) -> &Culture {
        self.indexable.culture()
    }

    fn configuration(&self, field_name: &str) -> Option<&dyn FieldConfiguration> {
        self.context.field_map.field_configuration(field_name)
    }

    fn configuration_boost(&self, field_name: &str) -> f32 {
        self.configuration(field_name)
            .map(|config| config.boost())
            .unwrap_or_default()
    }

    /// Write the item boost under [`DOCUMENT_BOOST_FIELD`] when it is positive.
    pub fn add_boost(&self) {
        let boost = self.context.boosting.item_boost(self.indexable);
        if boost > 0.0 {
            self.document.add_if_absent(
                DOCUMENT_BOOST_FIELD,
                StoredValue::Value(FieldValue::Float(f64::from(boost))),
            );
        }
    }

    /// Ingest one stored field of the indexable.
    pub fn add_field(&self, field: &dyn IndexableDataField) {
        let name = field.name();
        let config = self.configuration(name);
        let value = substitute(self.context.field_reader.read(field), config);

        let value = match value {
            None => {
                debug!(
                    id = field.id(),
                    name,
                    type_key = field.type_key(),
                    "skipping field: value is null"
                );
                return;
            }
            Some(value) if value.is_empty() => {
                debug!(
                    id = field.id(),
                    name,
                    type_key = field.type_key(),
                    "skipping field: value is empty"
                );
                return;
            }
            Some(value) => value,
        };

        let boost = self.context.boosting.field_boost(field) + self.configuration_boost(name);
        let index_name = self.context.translator.index_field_name(
            name,
            FieldType::Kind(value.kind()),
            self.culture(),
        );

        if !self.indexable.is_media() && is_text_field(field.type_key()) {
            self.store_field(
                CONTENT_FIELD,
                CONTENT_FIELD,
                value.clone(),
                true,
                None,
                Some(field.type_key()),
            );
        }
        self.store_field(name, &index_name, value, false, Some(boost), Some(field.type_key()));
    }

    /// Write a value under a logical name, naming the physical field after
    /// the value's runtime kind.
    ///
    /// The field configuration's formatter runs first. With `append`, text is
    /// joined onto an existing text value of the same physical field.
    pub fn add_value(&self, field_name: &str, value: Option<FieldValue>, append: bool) {
        let value = match self.configuration(field_name) {
            Some(config) => config.format(value),
            None => value,
        };

        match value {
            None => debug!(name = field_name, "skipping field: value is null"),
            Some(value) if value.is_empty() => {
                debug!(name = field_name, "skipping field: value is empty")
            }
            Some(value) => {
                let index_name = self.context.translator.index_field_name(
                    field_name,
                    FieldType::Kind(value.kind()),
                    self.culture(),
                );
                let boost = self.configuration_boost(field_name);
                self.store_field(field_name, &index_name, value, append, Some(boost), None);
            }
        }
    }

    /// Write a value under a logical name, naming the physical field after
    /// an explicit return type.
    pub fn add_typed_value(&self, field_name: &str, value: Option<FieldValue>, return_type: &str) {
        let config = self.configuration(field_name);
        match substitute(value, config) {
            None => debug!(name = field_name, return_type, "skipping field: value is null"),
            Some(value) if value.is_empty() => {
                debug!(name = field_name, return_type, "skipping field: value is empty")
            }
            Some(value) => {
                let index_name = self.context.translator.index_field_name(
                    field_name,
                    FieldType::ReturnType(return_type),
                    self.culture(),
                );
                let boost = self.configuration_boost(field_name);
                self.store_field(
                    field_name,
                    &index_name,
                    value,
                    false,
                    Some(boost),
                    Some(return_type),
                );
            }
        }
    }

    /// Evaluate every configured computed field.
    pub fn add_computed_index_fields(&self) -> Result<()> {
        let fields = self.context.computed_fields();
        if fields.is_empty() {
            return Ok(());
        }
        debug!(
            indexable = self.indexable.unique_id(),
            strategy = self.context.strategy.name(),
            count = fields.len(),
            "adding computed index fields"
        );
        self.context
            .strategy
            .run(fields, &|field| self.add_computed_index_field(field))
    }

    /// Evaluate one computed field and write its value.
    ///
    /// Failures are logged; they are returned only in strict mode.
    fn add_computed_index_field(
        &self,
        field: &dyn ComputedIndexField,
    ) -> std::result::Result<(), FieldComputationError> {
        let field_name = field.field_name();
        let fallback = self.context.settings.enable_field_language_fallback;
        let computed = {
            let _fallback = LanguageFallbackSwitcher::enter(fallback);
            field.compute(self.indexable)
        };

        let value = match computed {
            Ok(value) => value,
            Err(source) => {
                warn!(
                    field = field_name,
                    indexable = self.indexable.unique_id(),
                    error = %source,
                    "could not compute value for computed index field"
                );
                if self.context.settings.stop_on_crawl_field_error {
                    return Err(FieldComputationError::new(
                        field_name,
                        self.indexable.unique_id(),
                        source,
                    ));
                }
                return Ok(());
            }
        };

        match field.return_type() {
            Some(return_type)
                if !return_type.is_empty() && !self.context.is_schema_field(field_name) =>
            {
                self.add_typed_value(field_name, value, return_type)
            }
            _ => self.add_value(field_name, value, true),
        }
        Ok(())
    }

    fn store_field(
        &self,
        untranslated_name: &str,
        field_name: &str,
        value: FieldValue,
        append: bool,
        boost: Option<f32>,
        return_type: Option<&str>,
    ) {
        let unformatted = tracing::enabled!(Level::TRACE).then(|| value.clone());
        let value = match &self.context.storage_formatter {
            Some(formatter) => formatter.format_for_storage(value, untranslated_name),
            None => value,
        };
        if let Some(unformatted) = unformatted {
            trace!(
                field = field_name,
                kind = ?unformatted.kind(),
                count = ?unformatted.item_count(),
                unformatted = %unformatted,
                formatted = %value,
                return_type = ?return_type,
                boost = ?boost,
                append,
                "storing field"
            );
        }

        if append {
            if let FieldValue::Text(text) = &value {
                if self.document.append_text(field_name, text) {
                    return;
                }
            }
        }

        let stored = StoredValue::with_boost(value, boost);
        let alias = (self.context.translator.has_culture(field_name)
            && !self.culture().is_default_language(&self.context.settings.default_language))
        .then(|| self.context.translator.strip_known_cultures(field_name));

        match alias {
            Some(alias) => {
                if self.document.add_if_absent(field_name, stored.clone()) {
                    self.document.add_if_absent(&alias, stored);
                } else {
                    self.append_after_race(field_name, append, &stored);
                }
            }
            None => {
                if !self.document.add_if_absent(field_name, stored.clone()) {
                    self.append_after_race(field_name, append, &stored);
                }
            }
        }
    }

    /// Another worker created the key between the append attempt and the
    /// insert; retry the append so no text is lost.
    fn append_after_race(&self, field_name: &str, append: bool, stored: &StoredValue) {
        if append {
            if let Some(text) = stored.as_text() {
                self.document.append_text(field_name, text);
            }
        }
    }

    /// Hand over the finished document.
    pub fn into_document(self) -> Document {
        self.document.into_document()
    }
}

/// Apply the null substitute, then the empty string substitute, of a field
/// configuration.
fn substitute(
    value: Option<FieldValue>,
    config: Option<&dyn FieldConfiguration>,
) -> Option<FieldValue> {
    let Some(config) = config else {
        return value;
    };
    let value = value.or_else(|| config.null_value().cloned());
    if let Some(FieldValue::Text(text)) = &value
        && text.is_empty()
        && let Some(substitute) = config.empty_string_value()
    {
        return Some(FieldValue::Text(substitute.to_string()));
    }
    value
}
