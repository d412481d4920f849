//! Error types for the Docweaver library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`DocweaverError`] enum. Failures raised by computed field functions are
//! carried as [`FieldComputationError`] values so callers can tell which field
//! of which indexable failed.
//!
//! # Examples
//!
//! ```
//! use docweaver::error::{DocweaverError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(DocweaverError::configuration("missing default language"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// A computed field function failed while building a document.
#[derive(Error, Debug)]
#[error(
    "could not compute value for computed index field `{field_name}` \
     for indexable `{indexable_id}`: {source}"
)]
pub struct FieldComputationError {
    /// Logical name of the computed field.
    pub field_name: String,

    /// Unique identifier of the indexable being built.
    pub indexable_id: String,

    /// The failure returned by the field function.
    #[source]
    pub source: anyhow::Error,
}

impl FieldComputationError {
    /// Create a new field computation error.
    pub fn new<N, I>(field_name: N, indexable_id: I, source: anyhow::Error) -> Self
    where
        N: Into<String>,
        I: Into<String>,
    {
        FieldComputationError {
            field_name: field_name.into(),
            indexable_id: indexable_id.into(),
            source,
        }
    }
}

/// Display helper listing the causes of an aggregate failure.
struct Causes<'a>(&'a [FieldComputationError]);

impl fmt::Display for Causes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cause) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{cause}")?;
        }
        Ok(())
    }
}

/// The main error type for Docweaver operations.
#[derive(Error, Debug)]
pub enum DocweaverError {
    /// A single computed field failed in sequential strict mode.
    #[error(transparent)]
    FieldComputation(#[from] FieldComputationError),

    /// One or more computed fields failed in parallel strict mode.
    #[error("{} computed index field(s) failed: {}", .0.len(), Causes(.0.as_slice()))]
    AggregateFieldComputation(Vec<FieldComputationError>),

    /// Settings or worker pool could not be set up.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors (reading settings files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with DocweaverError.
pub type Result<T> = std::result::Result<T, DocweaverError>;

impl DocweaverError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        DocweaverError::Configuration(msg.into())
    }

    /// Computed field failures carried by this error, if any.
    pub fn field_failures(&self) -> &[FieldComputationError] {
        match self {
            DocweaverError::FieldComputation(e) => std::slice::from_ref(e),
            DocweaverError::AggregateFieldComputation(errors) => errors,
            _ => &[],
        }
    }
}
