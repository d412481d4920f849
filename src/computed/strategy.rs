//! Sequential and parallel evaluation of computed fields.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::computed::field::ComputedIndexField;
use crate::config::ParallelOptions;
use crate::error::{DocweaverError, FieldComputationError, Result};

/// Evaluates and writes one computed field.
///
/// Returns an error only when the failure must not be suppressed.
pub type FieldEvaluation<'a> =
    dyn Fn(&dyn ComputedIndexField) -> std::result::Result<(), FieldComputationError> + Sync + 'a;

/// A way of running every computed field of a build.
pub trait ComputedFieldStrategy: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Run `evaluate` for the given fields.
    fn run(
        &self,
        fields: &[Arc<dyn ComputedIndexField>],
        evaluate: &FieldEvaluation<'_>,
    ) -> Result<()>;
}

/// Evaluates fields in declaration order on the calling thread and stops at
/// the first unsuppressed failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

impl ComputedFieldStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn run(
        &self,
        fields: &[Arc<dyn ComputedIndexField>],
        evaluate: &FieldEvaluation<'_>,
    ) -> Result<()> {
        for field in fields {
            evaluate(field.as_ref())?;
        }
        Ok(())
    }
}

/// Evaluates fields on a bounded worker pool.
///
/// The first unsuppressed failure raises a stop flag: workers skip fields
/// they have not started yet, in-flight evaluations finish. All collected
/// failures are reported as one aggregate error after the pool is done.
pub struct ParallelStrategy {
    thread_pool: Arc<ThreadPool>,
}

impl ParallelStrategy {
    /// Create a strategy with its own worker pool.
    pub fn new(options: &ParallelOptions) -> Result<Self> {
        let prefix = options.thread_name_prefix.clone();
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(options.worker_count())
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| {
                DocweaverError::configuration(format!("Failed to create thread pool: {e}"))
            })?;

        Ok(Self {
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

impl ComputedFieldStrategy for ParallelStrategy {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn run(
        &self,
        fields: &[Arc<dyn ComputedIndexField>],
        evaluate: &FieldEvaluation<'_>,
    ) -> Result<()> {
        let stop = AtomicBool::new(false);
        let (failure_tx, failure_rx) = crossbeam_channel::unbounded();

        self.thread_pool.install(|| {
            fields.par_iter().for_each_with(failure_tx, |failures, field| {
                if stop.load(Ordering::Acquire) {
                    debug!(field = field.field_name(), "skipping computed index field after stop");
                    return;
                }
                if let Err(error) = evaluate(field.as_ref()) {
                    stop.store(true, Ordering::Release);
                    // The receiver outlives the pool run.
                    let _ = failures.send(error);
                }
            });
        });

        let failures: Vec<FieldComputationError> = failure_rx.try_iter().collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DocweaverError::AggregateFieldComputation(failures))
        }
    }
}

impl std::fmt::Debug for ParallelStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelStrategy")
            .field("workers", &self.worker_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use parking_lot::Mutex;

    use super::*;
    use crate::computed::field::FnComputedField;
    use crate::document::field_value::FieldValue;

    fn fields(names: &[&str]) -> Vec<Arc<dyn ComputedIndexField>> {
        names
            .iter()
            .map(|name| {
                Arc::new(FnComputedField::new(*name, |_| Ok(Some(FieldValue::from("v")))))
                    as Arc<dyn ComputedIndexField>
            })
            .collect()
    }

    fn failure(field: &dyn ComputedIndexField) -> FieldComputationError {
        FieldComputationError::new(field.field_name(), "item-1", anyhow::anyhow!("boom"))
    }

    #[test]
    fn test_sequential_keeps_declaration_order() {
        let seen = Mutex::new(Vec::new());
        SequentialStrategy
            .run(&fields(&["a", "b", "c"]), &|field| {
                seen.lock().push(field.field_name().to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(*seen.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sequential_stops_at_first_failure() {
        let seen = Mutex::new(Vec::new());
        let err = SequentialStrategy
            .run(&fields(&["a", "b", "c"]), &|field| {
                seen.lock().push(field.field_name().to_string());
                if field.field_name() == "b" {
                    Err(failure(field))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert!(matches!(err, DocweaverError::FieldComputation(ref e) if e.field_name == "b"));
        assert_eq!(*seen.lock(), vec!["a", "b"]);
    }

    #[test]
    fn test_parallel_attempts_every_field_once() {
        let options = ParallelOptions::default().with_max_degree_of_parallelism(4);
        let strategy = ParallelStrategy::new(&options).unwrap();
        assert_eq!(strategy.worker_count(), 4);

        let names: Vec<String> = (0..32).map(|i| format!("f{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let seen = Mutex::new(Vec::new());
        strategy
            .run(&fields(&refs), &|field| {
                seen.lock().push(field.field_name().to_string());
                Ok(())
            })
            .unwrap();

        let mut seen = seen.into_inner();
        seen.sort();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_parallel_aggregates_failures() {
        // One worker makes the stop flag deterministic: nothing after the
        // first failure is started.
        let options = ParallelOptions::default().with_max_degree_of_parallelism(1);
        let strategy = ParallelStrategy::new(&options).unwrap();
        let attempted = AtomicUsize::new(0);

        let err = strategy
            .run(&fields(&["a", "b", "c"]), &|field| {
                attempted.fetch_add(1, Ordering::SeqCst);
                Err(failure(field))
            })
            .unwrap_err();

        match err {
            DocweaverError::AggregateFieldComputation(failures) => {
                assert_eq!(failures.len(), attempted.load(Ordering::SeqCst));
                assert!(!failures.is_empty());
            }
            other => panic!("expected aggregate error, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_with_no_fields() {
        let strategy = ParallelStrategy::new(&ParallelOptions::default()).unwrap();
        strategy.run(&[], &|_| Ok(())).unwrap();
    }
}
