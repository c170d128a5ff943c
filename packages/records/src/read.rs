//! Raw row readers.
//!
//! Both readers produce one JSON object per data row so that a single
//! normalizer handles every format. CSV cells are all text; empty cells
//! become `null`.

use std::io::Read;

use serde_json::{Map, Value};

use crate::RecordError;

/// A raw row keyed by column name.
pub type Row = Map<String, Value>;

/// Reads CSV rows with a header line.
///
/// Rows that fail to parse are skipped with a warning.
///
/// # Errors
///
/// Returns [`RecordError`] if the header cannot be read or is empty.
pub fn csv_rows(reader: impl Read) -> Result<Vec<Row>, RecordError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(RecordError::Format {
            message: "CSV file contains no header row".to_owned(),
        });
    }

    let mut rows = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV row {}: {e}", i + 1);
                continue;
            }
        };

        let mut row = Row::new();
        for (j, header) in headers.iter().enumerate() {
            let cell = record.get(j).unwrap_or("");
            let value = if cell.trim().is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_owned())
            };
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }

    log::debug!("Parsed {} CSV rows", rows.len());

    Ok(rows)
}

/// Reads a JSON array of row objects (a records-oriented table export).
///
/// Array elements that are not objects are skipped with a warning.
///
/// # Errors
///
/// Returns [`RecordError`] if the text is not JSON or not an array.
pub fn json_rows(text: &str) -> Result<Vec<Row>, RecordError> {
    let json: Value = serde_json::from_str(text)?;

    let Value::Array(items) = json else {
        return Err(RecordError::Format {
            message: "Expected a JSON array of activity rows".to_owned(),
        });
    };

    let rows: Vec<Row> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(row) => Some(row),
            other => {
                log::warn!("Skipping JSON row {i}: expected an object, found {other}");
                None
            }
        })
        .collect();

    log::debug!("Parsed {} JSON rows", rows.len());

    Ok(rows)
}
