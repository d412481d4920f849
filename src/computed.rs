//! Computed index fields and the strategies that evaluate them.
//!
//! A computed field derives a value from the whole indexable instead of
//! reading one stored field. The builder evaluates the configured set with
//! one of two strategies, chosen once per index context:
//!
//! - [`SequentialStrategy`] - declaration order, first failure aborts the build
//! - [`ParallelStrategy`] - worker pool, failures are collected and reported together

pub mod field;
pub mod strategy;

pub use field::{ComputedIndexField, FnComputedField};
pub use strategy::{ComputedFieldStrategy, FieldEvaluation, ParallelStrategy, SequentialStrategy};
