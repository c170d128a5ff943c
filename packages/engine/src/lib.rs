#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The activity map core.
//!
//! [`ActivityMap`] holds the full activity dataset, the county boundaries,
//! and the categorical index built from the dataset. Each call to
//! [`ActivityMap::evaluate`] is a pure function of the loaded data and one
//! [`FilterSelection`]: it filters records spatially and categorically,
//! assigns every surviving point to its first covering county, and tallies
//! per-county shares. Nothing is cached between evaluations.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod index;
pub mod labels;

#[cfg(test)]
mod test_support;

use collab_map_activity_models::{ActivityField, ActivityRecord, FilterSelection};
use collab_map_geography::{BoundarySource, Boundaries, GeoError};
use collab_map_geography_models::{CountyLabel, CountyTally, MapView};
use collab_map_records::{RecordError, RecordSource};
use collab_map_spatial::Region;
use geojson::FeatureCollection;

pub use filter::{FilterStats, Located};
pub use index::CategoricalIndex;

/// Errors that can occur while assembling an [`ActivityMap`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Boundaries could not be loaded.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The activity dataset could not be loaded.
    #[error(transparent)]
    Records(#[from] RecordError),

    /// The activity dataset is empty.
    #[error("No activity records to map")]
    NoRecords,
}

/// Loaded dataset, boundaries, and categorical index.
pub struct ActivityMap {
    records: Vec<ActivityRecord>,
    boundaries: Boundaries,
    index: CategoricalIndex,
}

impl ActivityMap {
    /// Builds the map state, indexing every record's categorical values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoRecords`] if `records` is empty.
    pub fn new(records: Vec<ActivityRecord>, boundaries: Boundaries) -> Result<Self, EngineError> {
        if records.is_empty() {
            return Err(EngineError::NoRecords);
        }

        let index = CategoricalIndex::build(&records);
        log::info!(
            "Indexed {} records: {} faculty, {} focus areas, {} activities, {} campus partners",
            records.len(),
            index.values(ActivityField::FacultyPartners).len(),
            index.values(ActivityField::FocusCleaned).len(),
            index.values(ActivityField::ActivityName).len(),
            index.values(ActivityField::CampusPartners).len(),
        );

        Ok(Self {
            records,
            boundaries,
            index,
        })
    }

    /// Loads boundaries and the activity dataset from their configured
    /// sources.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if either source cannot be loaded or the
    /// dataset is empty.
    pub fn load(boundaries: &BoundarySource, records: &RecordSource) -> Result<Self, EngineError> {
        let boundaries = collab_map_geography::load_boundaries(boundaries)?;
        let records = collab_map_records::load_records(records)?;
        Self::new(records, boundaries)
    }

    #[must_use]
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    #[must_use]
    pub const fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    #[must_use]
    pub const fn categorical_index(&self) -> &CategoricalIndex {
        &self.index
    }

    /// Sorted distinct values of `field` across the whole dataset.
    #[must_use]
    pub fn distinct_values(&self, field: ActivityField) -> &[String] {
        self.index.values(field)
    }

    /// Initial map view fitted to the boundary mask.
    #[must_use]
    pub fn view(&self) -> Option<MapView> {
        self.boundaries.view()
    }

    /// Filters, assigns, and tallies the dataset for one selection.
    #[must_use]
    pub fn evaluate(&self, selection: &FilterSelection) -> Evaluation<'_> {
        let (activities, stats) =
            filter::filter_records(&self.records, self.boundaries.mask(), selection);
        let assignments = aggregate::assign_regions(&activities, self.boundaries.index());
        let tally = aggregate::tally_regions(&assignments, self.boundaries.regions());

        log::info!(
            "Selection{} matched {} activities across {} counties",
            if selection.is_unconstrained() { " (all)" } else { "" },
            tally.total,
            tally.non_empty().count()
        );

        Evaluation {
            activities,
            assignments,
            tally,
            stats,
            regions: self.boundaries.regions(),
        }
    }
}

/// The result of one [`ActivityMap::evaluate`] call.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    activities: Vec<Located<'a>>,
    assignments: Vec<Option<usize>>,
    tally: CountyTally,
    stats: FilterStats,
    regions: &'a [Region],
}

impl<'a> Evaluation<'a> {
    /// The filtered set, in dataset order.
    #[must_use]
    pub fn activities(&self) -> &[Located<'a>] {
        &self.activities
    }

    /// Filtered records, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a ActivityRecord> + '_ {
        self.activities.iter().map(|activity| activity.record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    #[must_use]
    pub const fn tally(&self) -> &CountyTally {
        &self.tally
    }

    #[must_use]
    pub const fn stats(&self) -> FilterStats {
        self.stats
    }

    /// The county assigned to the `i`th filtered activity.
    #[must_use]
    pub fn region_of(&self, i: usize) -> Option<&'a Region> {
        let position = (*self.assignments.get(i)?)?;
        self.regions.get(position)
    }

    /// Percentage labels for counties holding at least one activity.
    #[must_use]
    pub fn labels(&self) -> Vec<CountyLabel> {
        labels::county_labels(&self.tally, self.regions)
    }

    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        export::to_feature_collection(self)
    }
}

#[cfg(test)]
mod tests {
    use collab_map_activity_models::ActivityFields;
    use collab_map_spatial::BoundaryMask;
    use geo::{MultiPolygon, Rect};

    use super::*;
    use crate::test_support::{boundaries, located, regions};

    fn record(longitude: f64, latitude: f64, faculty: &str, focus: &str) -> ActivityRecord {
        ActivityRecord::new(ActivityFields {
            longitude: Some(longitude),
            latitude: Some(latitude),
            activity_name: Some(format!("{faculty} / {focus}")),
            faculty_partners: Some(faculty.to_string()),
            focus_cleaned: Some(focus.to_string()),
            ..ActivityFields::default()
        })
    }

    fn map(records: Vec<ActivityRecord>) -> ActivityMap {
        ActivityMap::new(records, boundaries()).unwrap()
    }

    #[test]
    fn rejects_an_empty_dataset() {
        assert!(matches!(
            ActivityMap::new(vec![], boundaries()),
            Err(EngineError::NoRecords)
        ));
    }

    #[test]
    fn faculty_selection_splits_across_counties() {
        let map = map(vec![
            record(-74.0, 40.0, "X", "Health"),
            record(-74.1, 40.1, "X, Y", "Health"),
            record(-75.0, 40.0, "X", "Health"),
            record(-75.1, 40.1, "Y", "Health"),
        ]);

        let evaluation = map.evaluate(&FilterSelection::all().with_faculty("X"));
        assert_eq!(evaluation.len(), 3);

        let tally = evaluation.tally();
        assert_eq!(tally.get("Mercer").unwrap().count, 2);
        assert_eq!(tally.get("Hunterdon").unwrap().count, 1);

        let labels: Vec<_> = evaluation
            .labels()
            .into_iter()
            .map(|l| (l.region_id, l.percentage))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Hunterdon".to_string(), "33.3%".to_string()),
                ("Mercer".to_string(), "66.7%".to_string()),
            ]
        );
    }

    #[test]
    fn deserialized_all_choices_keep_every_in_bounds_record() {
        let map = map(vec![record(-74.0, 40.0, "X", "Health")]);
        let selection: FilterSelection = serde_json::from_str(
            r#"{"faculty":"All","activityName":"All","campusPartner":""}"#,
        )
        .unwrap();

        let evaluation = map.evaluate(&selection);
        assert_eq!(evaluation.len(), 1);
        let mercer = evaluation.tally().get("Mercer").unwrap();
        assert_eq!(mercer.count, 1);
        assert!((mercer.percentage - 100.0).abs() < 1e-9);
        assert_eq!(evaluation.tally().get("Hunterdon").unwrap().count, 0);
    }

    #[test]
    fn out_of_state_and_missing_coordinates_are_dropped() {
        let map = map(vec![
            record(-74.0, 40.0, "X", ""),
            record(-80.0, 40.0, "X", ""),
            ActivityRecord::new(ActivityFields {
                faculty_partners: Some("X".to_string()),
                ..ActivityFields::default()
            }),
        ]);

        let evaluation = map.evaluate(&FilterSelection::all());
        assert_eq!(evaluation.len(), 1);
        assert_eq!(evaluation.stats().outside_boundary, 1);
        assert_eq!(evaluation.stats().missing_coordinates, 1);
        assert!((evaluation.tally().get("Mercer").unwrap().percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_selection_result_has_no_labels() {
        let map = map(vec![record(-74.0, 40.0, "X", "Health")]);

        let evaluation = map.evaluate(&FilterSelection::all().with_faculty("Nobody"));
        assert!(evaluation.is_empty());
        assert_eq!(evaluation.tally().total, 0);
        assert!(evaluation.labels().is_empty());
        assert!(evaluation.to_feature_collection().features.is_empty());
    }

    #[test]
    fn focus_areas_must_all_match() {
        let map = map(vec![
            record(-74.0, 40.0, "X", "A, B, C"),
            record(-74.0, 40.0, "X", "A"),
        ]);

        let evaluation = map.evaluate(&FilterSelection::all().with_focus_areas(["A", "B"]));
        let names: Vec<_> = evaluation.records().map(ActivityRecord::activity_name).collect();
        assert_eq!(names, vec!["X / A, B, C"]);
    }

    #[test]
    fn percentages_sum_to_one_hundred_when_all_assigned() {
        let map = map(vec![
            record(-74.0, 40.0, "X", ""),
            record(-75.0, 40.0, "X", ""),
            record(-75.2, 39.9, "X", ""),
        ]);

        let evaluation = map.evaluate(&FilterSelection::all());
        let tally = evaluation.tally();
        assert_eq!(tally.unassigned, 0);
        assert_eq!(tally.assigned(), tally.total);

        let sum: f64 = tally.regions.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let map = map(vec![
            record(-74.5, 40.0, "X", "A"),
            record(-74.0, 40.0, "Y", "B"),
            record(-75.0, 40.0, "X", "A, B"),
        ]);
        let selection = FilterSelection::all().with_focus_areas(["A"]);

        let first = map.evaluate(&selection);
        let second = map.evaluate(&selection);
        assert_eq!(first.tally(), second.tally());
        assert_eq!(first.labels(), second.labels());
        assert_eq!(
            first.records().collect::<Vec<_>>(),
            second.records().collect::<Vec<_>>()
        );
    }

    #[test]
    fn shared_edge_point_counts_once() {
        let map = map(vec![record(-74.5, 40.0, "X", "")]);

        let evaluation = map.evaluate(&FilterSelection::all());
        assert_eq!(evaluation.tally().get("Hunterdon").unwrap().count, 1);
        assert_eq!(evaluation.tally().assigned(), 1);
        assert_eq!(evaluation.region_of(0).unwrap().id(), "Hunterdon");
    }

    #[test]
    fn points_inside_mask_but_outside_regions_are_unassigned() {
        let mask = BoundaryMask::new(MultiPolygon::new(vec![
            Rect::new((-76.0, 39.0), (-73.0, 41.0)).to_polygon(),
        ]));
        let boundaries = Boundaries::with_mask(regions(), mask).unwrap();
        let map = ActivityMap::new(
            vec![located(-74.0, 40.0, "Mercer", ""), located(-73.2, 40.0, "Shore", "")],
            boundaries,
        )
        .unwrap();

        let evaluation = map.evaluate(&FilterSelection::all());
        let tally = evaluation.tally();
        assert_eq!(tally.total, 2);
        assert_eq!(tally.unassigned, 1);
        assert!((tally.get("Mercer").unwrap().percentage - 50.0).abs() < 1e-9);
        assert!(evaluation.region_of(1).is_none());
    }

    #[test]
    fn distinct_values_cover_the_whole_dataset() {
        let map = map(vec![
            record(-74.0, 40.0, "Dr. Lee, Dr. Ortiz", "Health"),
            record(-80.0, 40.0, "Dr. Adams", "Arts"),
        ]);

        assert_eq!(
            map.distinct_values(ActivityField::FacultyPartners),
            ["Dr. Adams", "Dr. Lee", "Dr. Ortiz"]
        );
        assert_eq!(map.distinct_values(ActivityField::FocusCleaned), ["Arts", "Health"]);
    }

    #[test]
    fn view_is_fitted_to_the_mask() {
        let view = map(vec![record(-74.0, 40.0, "X", "")]).view().unwrap();
        assert!((view.center[0] - 40.0).abs() < 1e-9);
        assert!((view.center[1] - -74.5).abs() < 1e-9);
    }
}
