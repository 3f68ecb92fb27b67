//! Loaders that turn external input into records.
//!
//! Loads are all-or-nothing: the first malformed row aborts the whole load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::{LoadError, Result};
use crate::metrics::PipelineMetrics;
use crate::pipeline::{BatchOutcome, Pipeline};
use crate::record::{ContactRecord, DataRecord};

const DATA_RECORD_COLUMNS: usize = 3;

/// Read `id,name,value` rows from a CSV file. The first row is a header and is skipped.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_data_records(
    path: impl AsRef<Path>,
) -> std::result::Result<Vec<DataRecord>, LoadError> {
    let result = File::open(path.as_ref())
        .map_err(LoadError::from)
        .and_then(|file| read_data_records(BufReader::new(file)));

    match &result {
        Ok(records) => {
            PipelineMetrics::record_load("csv", records.len());
            info!(records = records.len(), "Loaded data records");
        }
        Err(e) => {
            PipelineMetrics::record_load_error("csv");
            warn!(error = %e, "Data record load failed");
        }
    }
    result
}

/// Parse CSV data from any reader. See [`load_data_records`].
pub fn read_data_records<R: Read>(reader: R) -> std::result::Result<Vec<DataRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = csv_reader.records();

    match rows.next() {
        Some(header) => {
            header?;
        }
        None => return Err(LoadError::MissingHeader),
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() != DATA_RECORD_COLUMNS {
            return Err(LoadError::RowLength {
                line,
                expected: DATA_RECORD_COLUMNS,
                got: row.len(),
            });
        }

        let id = row[0].parse::<i64>().map_err(|source| LoadError::InvalidId {
            line,
            value: row[0].to_string(),
            source,
        })?;
        let value = row[2].parse::<f64>().map_err(|source| LoadError::InvalidValue {
            line,
            value: row[2].to_string(),
            source,
        })?;

        records.push(DataRecord::new(id, &row[1], value));
    }

    Ok(records)
}

/// Read a JSON array of contact records
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_contact_records(
    path: impl AsRef<Path>,
) -> std::result::Result<Vec<ContactRecord>, LoadError> {
    let result = File::open(path.as_ref())
        .map_err(LoadError::from)
        .and_then(|file| {
            serde_json::from_reader::<_, Vec<ContactRecord>>(BufReader::new(file))
                .map_err(LoadError::from)
        });

    match &result {
        Ok(records) => {
            PipelineMetrics::record_load("json", records.len());
            info!(records = records.len(), "Loaded contact records");
        }
        Err(e) => {
            PipelineMetrics::record_load_error("json");
            warn!(error = %e, "Contact record load failed");
        }
    }
    result
}

/// Load a CSV file and run it through `pipeline`.
///
/// Load errors are fatal; validation failures land in the outcome.
pub fn process_csv_file(
    path: impl AsRef<Path>,
    pipeline: &Pipeline<DataRecord>,
) -> Result<BatchOutcome<DataRecord>> {
    let records = load_data_records(path)?;
    Ok(pipeline.process_batch(records))
}
