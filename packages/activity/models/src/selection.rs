//! The user's current filter choices.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// The choice shown at the top of every single-select filter, meaning "no
/// constraint".
pub const ALL_CHOICE: &str = "All";

/// Maps a filter control value to a constraint.
///
/// Blank input and [`ALL_CHOICE`] become `None`.
#[must_use]
pub fn normalize_choice(choice: &str) -> Option<String> {
    let choice = choice.trim();
    if choice.is_empty() || choice == ALL_CHOICE {
        None
    } else {
        Some(choice.to_string())
    }
}

/// The constraint a stored choice stands for. Blank and [`ALL_CHOICE`] mean
/// none.
fn constraint(choice: Option<&str>) -> Option<&str> {
    choice
        .map(str::trim)
        .filter(|choice| !choice.is_empty() && *choice != ALL_CHOICE)
}

fn deserialize_choice<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let choice = Option::<String>::deserialize(deserializer)?;
    Ok(choice.as_deref().and_then(normalize_choice))
}

/// A combination of field constraints. `None` / empty means unconstrained.
///
/// Focus areas are conjunctive: a record must carry every selected focus
/// area. The fields are public for presentation code; filtering reads them
/// through the `*_constraint` accessors, so a stored `"All"` or blank
/// choice never constrains anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Required faculty partner.
    #[serde(default, deserialize_with = "deserialize_choice")]
    pub faculty: Option<String>,
    /// Required activity name (exact match).
    #[serde(default, deserialize_with = "deserialize_choice")]
    pub activity_name: Option<String>,
    /// Required campus partner.
    #[serde(default, deserialize_with = "deserialize_choice")]
    pub campus_partner: Option<String>,
    /// Focus areas that must all be present.
    #[serde(default)]
    pub focus_areas: BTreeSet<String>,
}

impl FilterSelection {
    /// The unconstrained selection ("All" everywhere).
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_faculty(mut self, choice: &str) -> Self {
        self.faculty = normalize_choice(choice);
        self
    }

    #[must_use]
    pub fn with_activity_name(mut self, choice: &str) -> Self {
        self.activity_name = normalize_choice(choice);
        self
    }

    #[must_use]
    pub fn with_campus_partner(mut self, choice: &str) -> Self {
        self.campus_partner = normalize_choice(choice);
        self
    }

    /// Adds required focus areas. Blank entries are ignored.
    #[must_use]
    pub fn with_focus_areas<'a>(mut self, areas: impl IntoIterator<Item = &'a str>) -> Self {
        self.focus_areas.extend(
            areas
                .into_iter()
                .map(str::trim)
                .filter(|area| !area.is_empty())
                .map(str::to_owned),
        );
        self
    }

    #[must_use]
    pub fn faculty_constraint(&self) -> Option<&str> {
        constraint(self.faculty.as_deref())
    }

    #[must_use]
    pub fn activity_name_constraint(&self) -> Option<&str> {
        constraint(self.activity_name.as_deref())
    }

    #[must_use]
    pub fn campus_partner_constraint(&self) -> Option<&str> {
        constraint(self.campus_partner.as_deref())
    }

    /// Required focus areas, trimmed, with blanks skipped.
    pub fn focus_area_constraints(&self) -> impl Iterator<Item = &str> {
        self.focus_areas
            .iter()
            .map(|area| area.trim())
            .filter(|area| !area.is_empty())
    }

    /// Whether no field is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.faculty_constraint().is_none()
            && self.activity_name_constraint().is_none()
            && self.campus_partner_constraint().is_none()
            && self.focus_area_constraints().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_choice_is_no_constraint() {
        assert_eq!(normalize_choice("All"), None);
        assert_eq!(normalize_choice("  "), None);
        assert_eq!(normalize_choice(" Dr. Lee "), Some("Dr. Lee".to_string()));
    }

    #[test]
    fn builder_normalizes_choices() {
        let selection = FilterSelection::all()
            .with_faculty("All")
            .with_campus_partner("Library")
            .with_focus_areas(["Health", " ", "Education"]);

        assert_eq!(selection.faculty, None);
        assert_eq!(selection.campus_partner.as_deref(), Some("Library"));
        assert_eq!(selection.focus_areas.len(), 2);
        assert!(!selection.is_unconstrained());
        assert!(FilterSelection::all().is_unconstrained());
    }

    #[test]
    fn deserializes_partial_selection() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"focusAreas":["Health"]}"#).unwrap();
        assert!(selection.faculty.is_none());
        assert!(selection.focus_areas.contains("Health"));
    }

    #[test]
    fn deserialized_all_and_blank_choices_are_no_constraint() {
        let selection: FilterSelection = serde_json::from_str(
            r#"{"faculty":"All","activityName":"  ","campusPartner":"","focusAreas":[" "]}"#,
        )
        .unwrap();
        assert_eq!(selection.faculty, None);
        assert_eq!(selection.activity_name, None);
        assert_eq!(selection.campus_partner, None);
        assert!(selection.is_unconstrained());

        let selection: FilterSelection =
            serde_json::from_str(r#"{"faculty":" Dr. Lee ","activityName":null}"#).unwrap();
        assert_eq!(selection.faculty.as_deref(), Some("Dr. Lee"));
        assert_eq!(selection.activity_name, None);
    }

    #[test]
    fn literal_all_choices_do_not_constrain() {
        let selection = FilterSelection {
            faculty: Some("All".to_string()),
            activity_name: Some(String::new()),
            campus_partner: Some(" Library ".to_string()),
            focus_areas: ["", "Health "].into_iter().map(str::to_owned).collect(),
        };

        assert_eq!(selection.faculty_constraint(), None);
        assert_eq!(selection.activity_name_constraint(), None);
        assert_eq!(selection.campus_partner_constraint(), Some("Library"));
        assert_eq!(
            selection.focus_area_constraints().collect::<Vec<_>>(),
            vec!["Health"]
        );
        assert!(!selection.is_unconstrained());
    }
}
