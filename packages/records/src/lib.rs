#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Activity dataset loading.
//!
//! Reads the activities table from a CSV or JSON (array of row objects)
//! export, normalizes every row into an [`ActivityRecord`] through a
//! configurable [`ColumnMapping`], and hands the full list to the engine.
//! Problems confined to one row (a malformed CSV line, a number where text
//! was expected, a missing coordinate) never abort the load; an unreadable
//! or empty dataset does.

pub mod columns;
pub mod read;

use std::path::{Path, PathBuf};

use collab_map_activity_models::ActivityRecord;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use columns::ColumnMapping;

/// Errors that can occur while loading the activity dataset.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Reading the dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV header could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON export could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The data has an unexpected shape.
    #[error("Format error: {message}")]
    Format {
        /// Description of what went wrong.
        message: String,
    },

    /// The dataset contains no rows.
    #[error("No activity records found in {path}")]
    Empty {
        /// Dataset location.
        path: String,
    },
}

/// On-disk format of the activities export.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecordFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of row objects.
    Json,
}

impl RecordFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnsupportedFormat`] when the extension is
    /// missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, RecordError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        extension
            .parse()
            .map_err(|_| RecordError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Dataset location and column names, deserialized from the `[records]`
/// table of the map config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSource {
    /// Path to the activities export.
    pub path: PathBuf,
    /// Explicit format; inferred from the extension when unset.
    #[serde(default)]
    pub format: Option<RecordFormat>,
    /// Column names for each activity field.
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl RecordSource {
    /// The configured format, or the one implied by the path.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnsupportedFormat`] when no format is
    /// configured and the extension is not recognized.
    pub fn resolved_format(&self) -> Result<RecordFormat, RecordError> {
        self.format
            .map_or_else(|| RecordFormat::from_path(&self.path), Ok)
    }
}

/// Parses activity records from in-memory text.
///
/// # Errors
///
/// Returns [`RecordError`] if the document as a whole cannot be read.
pub fn parse_records(
    text: &str,
    format: RecordFormat,
    columns: &ColumnMapping,
) -> Result<Vec<ActivityRecord>, RecordError> {
    let rows = match format {
        RecordFormat::Csv => read::csv_rows(text.as_bytes())?,
        RecordFormat::Json => read::json_rows(text)?,
    };

    Ok(rows
        .iter()
        .map(|row| columns::normalize_row(row, columns))
        .collect())
}

/// Loads the whole activities dataset described by `source`.
///
/// # Errors
///
/// Returns [`RecordError`] if the file cannot be read or parsed, or holds
/// no rows.
pub fn load_records(source: &RecordSource) -> Result<Vec<ActivityRecord>, RecordError> {
    let format = source.resolved_format()?;
    log::info!(
        "Loading activity records from {} ({format})",
        source.path.display()
    );

    let text = std::fs::read_to_string(&source.path)?;
    let records = parse_records(&text, format, &source.columns)?;

    if records.is_empty() {
        return Err(RecordError::Empty {
            path: source.path.display().to_string(),
        });
    }

    let located = records
        .iter()
        .filter(|record| record.coordinates().is_some())
        .count();
    log::info!(
        "Loaded {} activity records ({located} with usable coordinates)",
        records.len()
    );

    Ok(records)
}
