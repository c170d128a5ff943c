//! Column mapping and row normalization.
//!
//! Maps spreadsheet column names onto [`ActivityFields`]. Cell decoding is
//! lenient: a categorical cell holding something other than text (a number
//! or boolean in a JSON export, say) is treated as missing rather than
//! failing the row, and coordinates are accepted as numbers or numeric
//! text.

use collab_map_activity_models::{ActivityFields, ActivityRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::read::Row;

/// Column names for each activity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub longitude: String,
    pub latitude: String,
    pub activity_name: String,
    pub faculty_partners: String,
    pub focus_cleaned: String,
    pub campus_partners: String,
    pub community_organizations: String,
    pub primary_contact_email: String,
    pub activity_url: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            longitude: "longitude".to_string(),
            latitude: "latitude".to_string(),
            activity_name: "activity_name".to_string(),
            faculty_partners: "faculty_partners".to_string(),
            focus_cleaned: "focus_cleaned".to_string(),
            campus_partners: "campus_partners".to_string(),
            community_organizations: "community_organizations".to_string(),
            primary_contact_email: "primary_contact_email".to_string(),
            activity_url: "activity_url".to_string(),
        }
    }
}

/// Builds an [`ActivityRecord`] from one raw row.
#[must_use]
pub fn normalize_row(row: &Row, columns: &ColumnMapping) -> ActivityRecord {
    ActivityRecord::new(ActivityFields {
        longitude: number_cell(row, &columns.longitude),
        latitude: number_cell(row, &columns.latitude),
        activity_name: text_cell(row, &columns.activity_name),
        faculty_partners: text_cell(row, &columns.faculty_partners),
        focus_cleaned: text_cell(row, &columns.focus_cleaned),
        campus_partners: text_cell(row, &columns.campus_partners),
        community_organizations: free_text_cell(row, &columns.community_organizations),
        primary_contact_email: free_text_cell(row, &columns.primary_contact_email),
        activity_url: free_text_cell(row, &columns.activity_url),
    })
}

/// A coordinate cell: a JSON number or numeric text. Anything else is
/// missing.
fn number_cell(row: &Row, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A filterable text cell, trimmed. Non-text values are missing.
fn text_cell(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Null => None,
        other => {
            log::debug!("Treating non-text `{column}` value {other} as missing");
            None
        }
    }
}

/// A display-only cell, passed through as written. Scalars are rendered
/// as text.
fn free_text_cell(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
