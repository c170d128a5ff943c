#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County-level output types for the collaboratory map.
//!
//! These types carry the results of a filter evaluation to whatever renders
//! them: per-county counts and percentages, the labels drawn at county
//! centroids, and the map view framing the state. They are plain data with
//! no geometry dependencies.

use serde::{Deserialize, Serialize};

/// Share of `total` represented by `count`, as a percentage.
///
/// Defined as `0.0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Formats a percentage for display with one decimal place (e.g. `"12.5%"`).
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Axis-aligned bounds of the state boundary, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    /// Western edge (minimum longitude).
    pub min_lon: f64,
    /// Southern edge (minimum latitude).
    pub min_lat: f64,
    /// Eastern edge (maximum longitude).
    pub max_lon: f64,
    /// Northern edge (maximum latitude).
    pub max_lat: f64,
}

impl MapBounds {
    #[must_use]
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Midpoint of the bounds as `(latitude, longitude)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(self.min_lat, self.max_lat),
            f64::midpoint(self.min_lon, self.max_lon),
        )
    }

    /// South-west and north-east corners as `[[lat, lon], [lat, lon]]`, used
    /// both to fit the view and to cap panning.
    #[must_use]
    pub const fn corners(&self) -> [[f64; 2]; 2] {
        [
            [self.min_lat, self.min_lon],
            [self.max_lat, self.max_lon],
        ]
    }
}

/// The initial framing of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Center as `[lat, lon]`.
    pub center: [f64; 2],
    /// Fit and max bounds as `[[lat, lon], [lat, lon]]`.
    pub bounds: [[f64; 2]; 2],
}

impl From<MapBounds> for MapView {
    fn from(bounds: MapBounds) -> Self {
        let (lat, lon) = bounds.center();
        Self {
            center: [lat, lon],
            bounds: bounds.corners(),
        }
    }
}

/// Count and share of the filtered activities located in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTally {
    /// Region identifier (county name).
    pub region_id: String,
    /// Filtered activities assigned to this region.
    pub count: u64,
    /// `count / total * 100`, unrounded.
    pub percentage: f64,
}

/// Per-region tally of one filter evaluation.
///
/// Lists every region in region order, including those with no
/// activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyTally {
    /// One entry per region, in region order.
    pub regions: Vec<RegionTally>,
    /// Size of the filtered set (the percentage denominator).
    pub total: u64,
    /// Filtered points that matched no region.
    pub unassigned: u64,
}

impl CountyTally {
    /// Builds a tally from per-region counts.
    ///
    /// `counts` pairs each region identifier with its count, in region
    /// order.
    #[must_use]
    pub fn from_counts(
        counts: impl IntoIterator<Item = (String, u64)>,
        total: u64,
        unassigned: u64,
    ) -> Self {
        let regions = counts
            .into_iter()
            .map(|(region_id, count)| RegionTally {
                region_id,
                count,
                percentage: percentage(count, total),
            })
            .collect();

        Self {
            regions,
            total,
            unassigned,
        }
    }

    /// Looks up a region's entry by identifier.
    #[must_use]
    pub fn get(&self, region_id: &str) -> Option<&RegionTally> {
        self.regions.iter().find(|r| r.region_id == region_id)
    }

    /// Sum of all region counts.
    #[must_use]
    pub fn assigned(&self) -> u64 {
        self.regions.iter().map(|r| r.count).sum()
    }

    /// Regions holding at least one activity, in region order.
    pub fn non_empty(&self) -> impl Iterator<Item = &RegionTally> {
        self.regions.iter().filter(|r| r.count > 0)
    }
}

/// A percentage label anchored at a region's centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyLabel {
    /// Region identifier (county name).
    pub region_id: String,
    /// Anchor latitude.
    pub latitude: f64,
    /// Anchor longitude.
    pub longitude: f64,
    /// Share of the filtered set, formatted with one decimal place.
    pub percentage: String,
}
