#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Engagement activity types shared across the collaboratory map.
//!
//! An [`ActivityRecord`] is one row of the activities spreadsheet. Its
//! comma-delimited categorical columns are parsed once into
//! [`CategorySet`]s when the record is built, so filtering never re-splits
//! raw text. [`FilterSelection`] is the user's current combination of
//! field constraints.

pub mod category;
pub mod selection;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use category::{CategorySet, split_values};
pub use selection::{ALL_CHOICE, FilterSelection, normalize_choice};

/// A filterable activity column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityField {
    /// Comma-delimited faculty partner names.
    FacultyPartners,
    /// Comma-delimited, cleaned focus areas.
    FocusCleaned,
    /// The activity's display name. Not split.
    ActivityName,
    /// Comma-delimited campus partner names.
    CampusPartners,
}

impl ActivityField {
    /// Every filterable field, in the order the filter controls are shown.
    pub const ALL: &[Self] = &[
        Self::FacultyPartners,
        Self::FocusCleaned,
        Self::ActivityName,
        Self::CampusPartners,
    ];

    /// Human-readable label for filter controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FacultyPartners => "Faculty Partner",
            Self::FocusCleaned => "Focus Areas",
            Self::ActivityName => "Activity Name",
            Self::CampusPartners => "Campus Partner",
        }
    }
}

/// A validated point location.
///
/// Geometric code uses `(x = longitude, y = latitude)`; anything shown to a
/// person is `(latitude, longitude)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
}

impl Coordinates {
    /// Builds coordinates from optional raw values.
    ///
    /// Returns `None` when either value is missing, non-finite, or outside
    /// the valid longitude/latitude range.
    #[must_use]
    pub fn new(longitude: Option<f64>, latitude: Option<f64>) -> Option<Self> {
        let longitude = longitude?;
        let latitude = latitude?;
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return None;
        }
        Some(Self {
            longitude,
            latitude,
        })
    }
}

/// The raw columns of one activities row, exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFields {
    /// Longitude (the spreadsheet's jittered column).
    pub longitude: Option<f64>,
    /// Latitude (the spreadsheet's jittered column).
    pub latitude: Option<f64>,
    /// Activity name.
    pub activity_name: Option<String>,
    /// Comma-delimited faculty partners.
    pub faculty_partners: Option<String>,
    /// Comma-delimited focus areas.
    pub focus_cleaned: Option<String>,
    /// Comma-delimited campus partners.
    pub campus_partners: Option<String>,
    /// Community organizations (free text).
    pub community_organizations: Option<String>,
    /// Primary contact email (free text).
    pub primary_contact_email: Option<String>,
    /// Activity URL (free text).
    pub activity_url: Option<String>,
}

/// One engagement activity with its categorical columns pre-parsed.
///
/// Immutable once built. Serializes as its raw [`ActivityFields`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    #[serde(flatten)]
    fields: ActivityFields,
    #[serde(skip)]
    coordinates: Option<Coordinates>,
    #[serde(skip)]
    faculty: CategorySet,
    #[serde(skip)]
    focus: CategorySet,
    #[serde(skip)]
    campus: CategorySet,
}

impl ActivityRecord {
    /// Builds a record, validating coordinates and parsing categorical
    /// columns.
    #[must_use]
    pub fn new(fields: ActivityFields) -> Self {
        let coordinates = Coordinates::new(fields.longitude, fields.latitude);
        let faculty = CategorySet::from_optional(fields.faculty_partners.as_deref());
        let focus = CategorySet::from_optional(fields.focus_cleaned.as_deref());
        let campus = CategorySet::from_optional(fields.campus_partners.as_deref());

        Self {
            fields,
            coordinates,
            faculty,
            focus,
            campus,
        }
    }

    /// The raw columns this record was built from.
    #[must_use]
    pub const fn fields(&self) -> &ActivityFields {
        &self.fields
    }

    /// The record's location, or `None` when missing or invalid.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// The activity name, or `""` when missing.
    #[must_use]
    pub fn activity_name(&self) -> &str {
        self.fields.activity_name.as_deref().unwrap_or_default()
    }

    /// Parsed faculty partners.
    #[must_use]
    pub const fn faculty(&self) -> &CategorySet {
        &self.faculty
    }

    /// Parsed focus areas.
    #[must_use]
    pub const fn focus_areas(&self) -> &CategorySet {
        &self.focus
    }

    /// Parsed campus partners.
    #[must_use]
    pub const fn campus_partners(&self) -> &CategorySet {
        &self.campus
    }

    /// The parsed set for a multi-valued field, `None` for
    /// [`ActivityField::ActivityName`].
    #[must_use]
    pub const fn category_set(&self, field: ActivityField) -> Option<&CategorySet> {
        match field {
            ActivityField::FacultyPartners => Some(&self.faculty),
            ActivityField::FocusCleaned => Some(&self.focus),
            ActivityField::CampusPartners => Some(&self.campus),
            ActivityField::ActivityName => None,
        }
    }
}

impl From<ActivityFields> for ActivityRecord {
    fn from(fields: ActivityFields) -> Self {
        Self::new(fields)
    }
}
