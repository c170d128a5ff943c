//! Parsed multi-valued categorical columns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Splits a comma-delimited cell into trimmed, non-empty values.
///
/// Cells containing only delimiters or whitespace yield nothing.
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|value| !value.is_empty())
}

/// The distinct values of one comma-delimited cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    /// Parses a comma-delimited cell.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(split_values(raw).map(str::to_owned).collect())
    }

    /// Parses an optional cell. A missing cell is the empty set.
    #[must_use]
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Whether `value` is one of the cell's values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    /// Whether every one of `values` is present. Vacuously true for none.
    #[must_use]
    pub fn contains_all<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> bool {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Iterates values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_dedups() {
        let set = CategorySet::parse(" Health, Education ,Health");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Education", "Health"]);
    }

    #[test]
    fn drops_empty_values() {
        assert!(CategorySet::parse(" , ,,").is_empty());
        assert_eq!(CategorySet::parse("Arts,,").len(), 1);
    }

    #[test]
    fn missing_cell_is_empty() {
        assert!(CategorySet::from_optional(None).is_empty());
    }

    #[test]
    fn contains_all_requires_every_value() {
        let set = CategorySet::parse("Health, Education, Environment");
        assert!(set.contains_all(["Health", "Education"]));
        assert!(!set.contains_all(["Health", "Housing"]));
        assert!(set.contains_all(std::iter::empty()));
    }

    #[test]
    fn values_are_case_sensitive() {
        let set = CategorySet::parse("Health");
        assert!(!set.contains("health"));
    }
}
