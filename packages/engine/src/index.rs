//! Distinct values per filterable field.
//!
//! Built once from the full dataset (not the filtered set) and used to
//! populate filter choices.

use std::collections::{BTreeMap, BTreeSet};

use collab_map_activity_models::{ALL_CHOICE, ActivityField, ActivityRecord};

/// Sorted, duplicate-free values of `field` across `records`.
///
/// Multi-valued fields contribute each trimmed sub-value; activity names
/// are taken whole. Missing and empty values contribute nothing.
#[must_use]
pub fn distinct_values(records: &[ActivityRecord], field: ActivityField) -> Vec<String> {
    let mut values = BTreeSet::new();

    for record in records {
        if let Some(set) = record.category_set(field) {
            values.extend(set.iter().map(str::to_owned));
        } else if !record.activity_name().is_empty() {
            values.insert(record.activity_name().to_owned());
        }
    }

    values.into_iter().collect()
}

/// Distinct values for every [`ActivityField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoricalIndex {
    values: BTreeMap<ActivityField, Vec<String>>,
}

impl CategoricalIndex {
    #[must_use]
    pub fn build(records: &[ActivityRecord]) -> Self {
        let values = ActivityField::ALL
            .iter()
            .map(|&field| (field, distinct_values(records, field)))
            .collect();
        Self { values }
    }

    /// Sorted distinct values of `field`.
    #[must_use]
    pub fn values(&self, field: ActivityField) -> &[String] {
        self.values.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Options for a filter control. Single-select controls get a leading
    /// [`ALL_CHOICE`]; the focus area multi-select does not.
    #[must_use]
    pub fn choices(&self, field: ActivityField) -> Vec<&str> {
        let leading = (field != ActivityField::FocusCleaned).then_some(ALL_CHOICE);
        leading
            .into_iter()
            .chain(self.values(field).iter().map(String::as_str))
            .collect()
    }
}
