//! Where county boundaries come from and which features to keep.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_name_property() -> String {
    "NAME".to_string()
}

fn default_state_property() -> String {
    "STATE".to_string()
}

/// Boundary file location and feature selection, deserialized from the
/// `[boundaries]` table of the map config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundarySource {
    /// Path to a `GeoJSON` `FeatureCollection` of county polygons.
    pub path: PathBuf,
    /// Feature property holding the region name.
    #[serde(default = "default_name_property")]
    pub name_property: String,
    /// Feature property holding the state code.
    #[serde(default = "default_state_property")]
    pub state_property: String,
    /// State code to keep (e.g. `"34"` for New Jersey). When unset, every
    /// feature is kept.
    #[serde(default)]
    pub state: Option<String>,
}

impl Default for BoundarySource {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            name_property: default_name_property(),
            state_property: default_state_property(),
            state: None,
        }
    }
}

impl BoundarySource {
    /// Short description of the state filter for log and error messages.
    #[must_use]
    pub fn describe_filter(&self) -> String {
        self.state.as_ref().map_or_else(
            || "all features".to_string(),
            |state| format!("{}={state}", self.state_property),
        )
    }
}
