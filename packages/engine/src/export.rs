//! GeoJSON export of one evaluation's filtered points.

use geojson::{Feature, FeatureCollection, Geometry, Value};

use crate::Evaluation;

/// Builds a `FeatureCollection` with one `Point` feature per filtered
/// activity, in filtered order.
///
/// Each feature carries the popup fields and a `region` property naming the
/// assigned county (`null` when unassigned).
#[must_use]
pub fn to_feature_collection(evaluation: &Evaluation<'_>) -> FeatureCollection {
    let features = evaluation
        .activities()
        .iter()
        .enumerate()
        .map(|(i, activity)| {
            let geometry = Geometry::new(Value::Point(vec![activity.point.x(), activity.point.y()]));
            let mut feature = Feature::from(geometry);
            let fields = activity.record.fields();

            feature.set_property("activity_name", fields.activity_name.clone());
            feature.set_property("faculty_partners", fields.faculty_partners.clone());
            feature.set_property("focus_cleaned", fields.focus_cleaned.clone());
            feature.set_property("campus_partners", fields.campus_partners.clone());
            feature.set_property(
                "community_organizations",
                fields.community_organizations.clone(),
            );
            feature.set_property(
                "primary_contact_email",
                fields.primary_contact_email.clone(),
            );
            feature.set_property("activity_url", fields.activity_url.clone());
            feature.set_property(
                "region",
                evaluation.region_of(i).map(|region| region.id().to_string()),
            );

            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
