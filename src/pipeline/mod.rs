//! Validate-then-transform record pipeline
//!
//! A [`Pipeline`] owns an ordered list of [`Validator`]s and an ordered list of
//! [`Transformer`]s. Each record is checked against every validator in order,
//! stopping at the first failure; records that pass are folded through the
//! transformers in order. Batches collect successes and per-record failures
//! separately and never abort on a single bad record.

pub mod presets;
pub mod rules;
pub mod transformers;
pub mod validators;

pub use rules::{FnTransformer, FnValidator, Transformer, Validator};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{BatchFailure, ValidationFailure};
use crate::metrics::{PipelineMetrics, StageTimer};
use crate::record::Record;

/// Result of running a batch through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome<R> {
    /// Transformed records that passed validation, in input order
    pub successes: Vec<R>,
    /// Rejected records, in input order
    pub failures: Vec<BatchFailure>,
}

impl<R> BatchOutcome<R> {
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<R> Default for BatchOutcome<R> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Ordered validation and transformation rules for records of type `R`
pub struct Pipeline<R> {
    validators: Vec<Box<dyn Validator<R>>>,
    transformers: Vec<Box<dyn Transformer<R>>>,
}

impl<R: Record> Pipeline<R> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            transformers: Vec::new(),
        }
    }

    /// Append a validator. Rules run in the order they were added.
    pub fn add_validator(&mut self, validator: impl Validator<R> + 'static) {
        self.validators.push(Box::new(validator));
    }

    /// Append a transformer. Rules run in the order they were added.
    pub fn add_transformer(&mut self, transformer: impl Transformer<R> + 'static) {
        self.transformers.push(Box::new(transformer));
    }

    pub fn with_validator(mut self, validator: impl Validator<R> + 'static) -> Self {
        self.add_validator(validator);
        self
    }

    pub fn with_transformer(mut self, transformer: impl Transformer<R> + 'static) -> Self {
        self.add_transformer(transformer);
        self
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn transformer_names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }

    /// Validate a single record, then transform it.
    ///
    /// Validators after the first failing one are never invoked.
    pub fn process_record(&self, record: R) -> Result<R, ValidationFailure> {
        for validator in &self.validators {
            if let Err(reason) = validator.validate(&record) {
                let failure = ValidationFailure {
                    rule: validator.name().to_string(),
                    record_id: record.id(),
                    reason,
                };
                debug!(rule = %failure.rule, record_id = %failure.record_id, "Record rejected");
                return Err(failure);
            }
        }

        Ok(self
            .transformers
            .iter()
            .fold(record, |current, transformer| transformer.transform(current)))
    }

    /// Process every record independently, preserving input order in both outputs.
    #[instrument(skip_all)]
    pub fn process_batch(&self, records: impl IntoIterator<Item = R>) -> BatchOutcome<R> {
        let timer = StageTimer::start(PipelineMetrics::BATCH_DURATION).label("mode", "sequential");

        let results = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| (index, self.process_record(record)));

        Self::collect_outcome(results, timer)
    }

    /// Same contract as [`Pipeline::process_batch`], evaluated on the rayon pool.
    #[cfg(feature = "parallel")]
    #[instrument(skip_all)]
    pub fn process_batch_parallel(&self, records: Vec<R>) -> BatchOutcome<R>
    where
        R: Send,
    {
        use rayon::prelude::*;

        let timer = StageTimer::start(PipelineMetrics::BATCH_DURATION).label("mode", "parallel");

        // Indexed collect keeps input order regardless of completion order
        let results: Vec<(usize, Result<R, ValidationFailure>)> = records
            .into_par_iter()
            .enumerate()
            .map(|(index, record)| (index, self.process_record(record)))
            .collect();

        Self::collect_outcome(results, timer)
    }

    fn collect_outcome(
        results: impl IntoIterator<Item = (usize, Result<R, ValidationFailure>)>,
        timer: StageTimer,
    ) -> BatchOutcome<R> {
        let mut outcome = BatchOutcome::default();

        for (index, result) in results {
            match result {
                Ok(record) => outcome.successes.push(record),
                Err(source) => {
                    PipelineMetrics::record_rejection(&source.rule);
                    outcome.failures.push(BatchFailure {
                        index,
                        record_id: source.record_id.clone(),
                        source,
                    });
                }
            }
        }

        let elapsed = timer.stop();
        PipelineMetrics::record_batch(outcome.successes.len(), outcome.failures.len());
        info!(
            accepted = outcome.successes.len(),
            rejected = outcome.failures.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Batch processed"
        );

        outcome
    }
}

impl<R: Record> Default for Pipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}
