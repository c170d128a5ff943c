//! Spatial and categorical record filtering.
//!
//! Each record is checked in order of cost: usable coordinates, then
//! boundary mask containment, then the selection. The output keeps input
//! order.

use collab_map_activity_models::{ActivityRecord, FilterSelection};
use collab_map_spatial::BoundaryMask;
use geo::Point;
use serde::Serialize;

/// A record that passed filtering, with the point built from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub record: &'a ActivityRecord,
    /// `(x = longitude, y = latitude)`.
    pub point: Point<f64>,
}

/// Why records were dropped during one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    /// Records examined.
    pub considered: u64,
    /// Records without usable coordinates.
    pub missing_coordinates: u64,
    /// Records located outside the boundary mask.
    pub outside_boundary: u64,
    /// In-bounds records rejected by the selection.
    pub not_selected: u64,
    /// Records kept.
    pub kept: u64,
}

/// Whether a record satisfies every constraint of `selection`.
///
/// Faculty and campus partner choices must be one of the record's values,
/// the activity name must match exactly, and every selected focus area
/// must be present.
#[must_use]
pub fn matches_selection(record: &ActivityRecord, selection: &FilterSelection) -> bool {
    selection
        .faculty_constraint()
        .is_none_or(|faculty| record.faculty().contains(faculty))
        && record
            .focus_areas()
            .contains_all(selection.focus_area_constraints())
        && selection
            .activity_name_constraint()
            .is_none_or(|name| record.activity_name().trim() == name)
        && selection
            .campus_partner_constraint()
            .is_none_or(|campus| record.campus_partners().contains(campus))
}

/// Returns the records inside `mask` that match `selection`, in input
/// order.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [ActivityRecord],
    mask: &BoundaryMask,
    selection: &FilterSelection,
) -> (Vec<Located<'a>>, FilterStats) {
    let mut stats = FilterStats::default();
    let mut kept = Vec::new();

    for record in records {
        stats.considered += 1;

        let Some(coordinates) = record.coordinates() else {
            stats.missing_coordinates += 1;
            continue;
        };

        let point = Point::new(coordinates.longitude, coordinates.latitude);
        if !mask.contains(point) {
            stats.outside_boundary += 1;
            continue;
        }

        if !matches_selection(record, selection) {
            stats.not_selected += 1;
            continue;
        }

        kept.push(Located { record, point });
    }

    stats.kept = kept.len() as u64;

    log::debug!(
        "Filtered {} of {} records ({} without coordinates, {} outside boundary)",
        stats.kept,
        stats.considered,
        stats.missing_coordinates,
        stats.outside_boundary
    );

    (kept, stats)
}

#[cfg(test)]
mod tests {
    use collab_map_activity_models::ActivityFields;

    use super::*;
    use crate::test_support::{boundaries, located};

    fn with_focus(focus: &str) -> ActivityRecord {
        located(-74.0, 40.0, "Clinic", focus)
    }

    #[test]
    fn focus_areas_are_conjunctive() {
        let selection = FilterSelection::all().with_focus_areas(["A", "B"]);
        assert!(matches_selection(&with_focus("A, B, C"), &selection));
        assert!(!matches_selection(&with_focus("A"), &selection));
        assert!(!matches_selection(&with_focus(""), &selection));
    }

    #[test]
    fn unconstrained_selection_matches_everything() {
        let blank = ActivityRecord::new(ActivityFields::default());
        assert!(matches_selection(&blank, &FilterSelection::all()));
    }

    #[test]
    fn scalar_choices_match_by_membership() {
        let record = ActivityRecord::new(ActivityFields {
            activity_name: Some("Tutoring".to_string()),
            faculty_partners: Some("Dr. Ortiz, Dr. Lee".to_string()),
            campus_partners: Some("Library".to_string()),
            ..ActivityFields::default()
        });

        assert!(matches_selection(&record, &FilterSelection::all().with_faculty("Dr. Lee")));
        assert!(!matches_selection(&record, &FilterSelection::all().with_faculty("Dr. Le")));
        assert!(matches_selection(
            &record,
            &FilterSelection::all().with_activity_name("Tutoring")
        ));
        assert!(!matches_selection(
            &record,
            &FilterSelection::all().with_activity_name("Tutor")
        ));
        assert!(matches_selection(
            &record,
            &FilterSelection::all().with_campus_partner("Library")
        ));
        assert!(!matches_selection(
            &record,
            &FilterSelection::all()
                .with_campus_partner("Library")
                .with_faculty("Dr. Adams")
        ));
    }

    #[test]
    fn stored_all_and_blank_choices_match_everything() {
        let record = ActivityRecord::new(ActivityFields {
            activity_name: Some(" Tutoring ".to_string()),
            faculty_partners: Some("Dr. Lee".to_string()),
            ..ActivityFields::default()
        });
        let selection = FilterSelection {
            faculty: Some("All".to_string()),
            activity_name: Some("  ".to_string()),
            campus_partner: Some(String::new()),
            focus_areas: [String::new()].into_iter().collect(),
        };

        assert!(matches_selection(&record, &selection));
        assert!(matches_selection(
            &record,
            &FilterSelection {
                activity_name: Some("Tutoring".to_string()),
                ..FilterSelection::default()
            }
        ));
    }

    #[test]
    fn drops_missing_and_out_of_bounds_records_in_order() {
        let boundaries = boundaries();
        let records = vec![
            located(-74.0, 40.0, "First", "Health"),
            ActivityRecord::new(ActivityFields {
                longitude: Some(-74.0),
                ..ActivityFields::default()
            }),
            located(-80.0, 40.0, "Ohio", "Health"),
            located(-75.0, 40.0, "Second", "Education"),
            located(-74.2, 39.8, "Third", "Health"),
        ];

        let (kept, stats) = filter_records(&records, boundaries.mask(), &FilterSelection::all());
        let names: Vec<_> = kept.iter().map(|l| l.record.activity_name()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(
            stats,
            FilterStats {
                considered: 5,
                missing_coordinates: 1,
                outside_boundary: 1,
                not_selected: 0,
                kept: 3,
            }
        );

        let selection = FilterSelection::all().with_focus_areas(["Health"]);
        let (kept, stats) = filter_records(&records, boundaries.mask(), &selection);
        assert_eq!(kept.len(), 2);
        assert_eq!(stats.not_selected, 1);
    }

    #[test]
    fn points_use_longitude_as_x() {
        let boundaries = boundaries();
        let records = vec![located(-74.0, 40.0, "Trenton", "")];
        let (kept, _) = filter_records(&records, boundaries.mask(), &FilterSelection::all());
        assert!((kept[0].point.x() - -74.0).abs() < f64::EPSILON);
        assert!((kept[0].point.y() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_edge_counts_as_inside() {
        let boundaries = boundaries();
        let records = vec![located(-73.5, 40.0, "East edge", "")];
        let (kept, _) = filter_records(&records, boundaries.mask(), &FilterSelection::all());
        assert_eq!(kept.len(), 1);
    }
}
