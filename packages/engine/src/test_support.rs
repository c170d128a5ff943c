//! Fixtures shared by the engine's unit tests.

use collab_map_activity_models::{ActivityFields, ActivityRecord};
use collab_map_geography::Boundaries;
use collab_map_spatial::Region;
use geo::{MultiPolygon, Rect};

pub fn square(id: &str, min: (f64, f64), max: (f64, f64)) -> Region {
    Region::new(id, MultiPolygon::new(vec![Rect::new(min, max).to_polygon()]))
}

/// Hunterdon and Mercer stand-ins sharing the edge at `x = -74.5`.
pub fn regions() -> Vec<Region> {
    vec![
        square("Hunterdon", (-75.5, 39.5), (-74.5, 40.5)),
        square("Mercer", (-74.5, 39.5), (-73.5, 40.5)),
    ]
}

pub fn boundaries() -> Boundaries {
    Boundaries::new(regions()).unwrap()
}

pub fn located(longitude: f64, latitude: f64, name: &str, focus: &str) -> ActivityRecord {
    ActivityRecord::new(ActivityFields {
        longitude: Some(longitude),
        latitude: Some(latitude),
        activity_name: Some(name.to_string()),
        focus_cleaned: Some(focus.to_string()),
        ..ActivityFields::default()
    })
}
