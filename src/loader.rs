use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use tracing::{error, info, warn};

use crate::config::{DATASET_PREFIX, DATE_FORMAT};
use crate::error::{AppError, Result};
use crate::types::{RawPropRow, REQUIRED_COLUMNS};

/// `{data_dir}/dashboard_merged_{YYYY-MM-DD}.csv`
pub fn dataset_path(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{DATASET_PREFIX}{}.csv", date.format(DATE_FORMAT)))
}

/// Load one day's rows. A file that cannot be opened is `DataUnavailable`.
pub fn load_rows(path: &Path) -> Result<Vec<RawPropRow>> {
    let file = File::open(path).map_err(|source| {
        warn!("Dataset unavailable at {}: {source}", path.display());
        AppError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let rows = read_rows(BufReader::new(file)).map_err(|e| match e {
        // Read failures after open still mean the file is unusable.
        AppError::Io(source) => AppError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        },
        other => {
            error!("Rejected dataset {}: {other}", path.display());
            other
        }
    })?;

    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse CSV from any reader, validating the header before any record.
/// No bytes at all, or a header with no records, is an empty dataset.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawPropRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Schema(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<RawPropRow>().enumerate() {
        let row = result.map_err(|e| match csv_error(e) {
            // record numbers are 1-based, header excluded
            AppError::Schema(msg) => AppError::Schema(format!("record {}: {msg}", i + 1)),
            other => other,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn csv_error(e: csv::Error) -> AppError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => AppError::Io(io),
            other => AppError::Schema(format!("{other:?}")),
        }
    } else {
        AppError::Schema(e.to_string())
    }
}
