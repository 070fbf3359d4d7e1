//! CSV ingest.
//!
//! This module only turns a delimited file into raw header text and raw rows.
//! Header normalization, date parsing and coercion live in `normalize`.
//!
//! Only a source that cannot be read as a table at all is an error. A single
//! malformed row is recorded in `row_errors` and skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::IngestError;

/// One data row as read from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the source (header is line 1).
    pub line: usize,
    pub fields: Vec<String>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Raw header text plus rows, untouched apart from CSV unquoting.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub row_errors: Vec<RowError>,
}

/// Open and read a CSV file.
pub fn load_csv(path: &Path) -> Result<RawTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading dataset");
    read_table(file)
}

/// Read CSV text from any reader.
pub fn read_table<R: Read>(input: R) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Header)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Empty);
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header and lines are 1-based.
        let fallback_line = idx + 2;

        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                rows.push(RawRow {
                    line,
                    fields: record.iter().map(str::to_string).collect(),
                });
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                warn!(line, error = %e, "skipping unreadable CSV row");
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
            }
        }
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        row_errors = row_errors.len(),
        "dataset read"
    );

    Ok(RawTable {
        headers,
        rows,
        row_errors,
    })
}
