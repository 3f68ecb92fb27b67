//! Rule-based record validation and transformation.
//!
//! The core is [`pipeline::Pipeline`]: validators run first and stop at the
//! first failure, then transformers run in declaration order. Loaders,
//! configuration, string helpers and a request metrics collector sit around it.

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod text;

pub use config::{AppConfig, PipelineConfig};
pub use error::{BatchFailure, ConfigError, Error, LoadError, Result, ValidationFailure};
pub use pipeline::{BatchOutcome, Pipeline, Transformer, Validator};
pub use record::{ContactRecord, DataRecord, Record, RecordId};
