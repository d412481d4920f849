//! Configuration for document building.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Worker pool options for parallel computed field evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelOptions {
    /// Maximum number of concurrent evaluations.
    /// If None, uses the number of CPU cores.
    pub max_degree_of_parallelism: Option<usize>,

    /// Prefix for worker thread names.
    pub thread_name_prefix: String,
}

impl ParallelOptions {
    /// Effective number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.max_degree_of_parallelism
            .filter(|n| *n > 0)
            .unwrap_or_else(num_cpus::get)
    }

    /// Cap the number of concurrent evaluations.
    pub fn with_max_degree_of_parallelism(mut self, workers: usize) -> Self {
        self.max_degree_of_parallelism = Some(workers);
        self
    }
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            max_degree_of_parallelism: None,
            thread_name_prefix: "computed-field".to_string(),
        }
    }
}

/// Settings consulted by the document builder.
///
/// # Examples
///
/// ```
/// use docweaver::config::BuilderSettings;
///
/// let settings = BuilderSettings::from_json_str(
///     r#"{"stop_on_crawl_field_error": true, "default_language": "da"}"#,
/// )
/// .unwrap();
///
/// assert!(settings.stop_on_crawl_field_error);
/// assert_eq!(settings.default_language, "da");
/// assert!(!settings.parallel_computed_fields);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Fail the document when a computed field fails.
    pub stop_on_crawl_field_error: bool,

    /// Language of the default culture; other cultures get culture-neutral aliases.
    pub default_language: String,

    /// Evaluate computed fields on a worker pool.
    pub parallel_computed_fields: bool,

    /// State of language fallback while computed fields are evaluated.
    pub enable_field_language_fallback: bool,

    /// Worker pool options used when `parallel_computed_fields` is set.
    pub parallel: ParallelOptions,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            stop_on_crawl_field_error: false,
            default_language: "en".to_string(),
            parallel_computed_fields: false,
            enable_field_language_fallback: false,
            parallel: ParallelOptions::default(),
        }
    }
}

impl BuilderSettings {
    /// Parse settings from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set strict mode.
    pub fn with_stop_on_crawl_field_error(mut self, stop: bool) -> Self {
        self.stop_on_crawl_field_error = stop;
        self
    }

    /// Set the default language.
    pub fn with_default_language<S: Into<String>>(mut self, language: S) -> Self {
        self.default_language = language.into();
        self
    }

    /// Evaluate computed fields in parallel.
    pub fn with_parallel_computed_fields(mut self, parallel: bool) -> Self {
        self.parallel_computed_fields = parallel;
        self
    }

    /// Set language fallback for computed field evaluation.
    pub fn with_field_language_fallback(mut self, enabled: bool) -> Self {
        self.enable_field_language_fallback = enabled;
        self
    }

    /// Set worker pool options.
    pub fn with_parallel_options(mut self, options: ParallelOptions) -> Self {
        self.parallel = options;
        self
    }
}
