use serde::Serialize;
use thiserror::Error;

use crate::record::RecordId;

/// A validation rule rejected a record.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("validation failed ({rule}) for record {record_id}: {reason}")]
pub struct ValidationFailure {
    /// Name of the rule that rejected the record
    pub rule: String,
    /// Identifier of the rejected record, verbatim
    pub record_id: RecordId,
    /// Reason reported by the rule
    pub reason: String,
}

/// A record that failed inside a batch, tagged with its position in the input.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("record {index} (ID: {record_id}): {source}")]
pub struct BatchFailure {
    pub index: usize,
    pub record_id: RecordId,
    #[source]
    pub source: ValidationFailure,
}

/// Errors that abort a whole load. There is no per-row recovery.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read header: input is empty")]
    MissingHeader,

    #[error("invalid row length on line {line}: expected {expected}, got {got}")]
    RowLength {
        line: u64,
        expected: usize,
        got: usize,
    },

    #[error("invalid ID format on line {line}: {value:?}: {source}")]
    InvalidId {
        line: u64,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid value format on line {line}: {value:?}: {source}")]
    InvalidValue {
        line: u64,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("config validation failed: {0}")]
    Invalid(String),
}

/// Errors surfaced by the file-level entry points
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
