//! `GeoJSON` county boundary parsing.
//!
//! Turns a `FeatureCollection` into an ordered list of [`Region`]s. Feature
//! order is preserved because it is the first-match tie-break order for
//! points on shared county edges. Individual features that cannot be used
//! are skipped with a warning; only a structurally wrong document is an
//! error.

use collab_map_spatial::{Region, to_multipolygon};
use geo::{MultiPolygon, Polygon};
use geojson::{Feature, GeoJson, JsonValue};

use crate::{BoundarySource, GeoError};

/// Parses a `GeoJSON` document into regions, keeping only features whose
/// state property matches `source.state` (when set).
///
/// Features sharing a name are merged into one region at the position of
/// the first occurrence, so each county gets a single tally entry. The
/// merged polygons take that earlier position in the tie-break order: with
/// features `A`, `B`, `A` in the file, a point on the edge between `B` and
/// the second `A` goes to `A`, not to `B` as a per-feature scan would give.
///
/// # Errors
///
/// Returns [`GeoError`] if the text is not `GeoJSON` or is a bare geometry.
pub fn parse_regions(geojson_str: &str, source: &BoundarySource) -> Result<Vec<Region>, GeoError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(GeoError::Conversion {
                message: "Expected a GeoJSON FeatureCollection, found a bare geometry"
                    .to_string(),
            });
        }
    };

    let total = features.len();
    let mut regions: Vec<(String, Vec<Polygon<f64>>)> = Vec::new();

    for (i, feature) in features.into_iter().enumerate() {
        if !matches_state(&feature, source) {
            continue;
        }

        let Some(name) = feature
            .property(&source.name_property)
            .and_then(property_text)
        else {
            log::warn!(
                "Skipping boundary feature {i}: missing `{}` property",
                source.name_property
            );
            continue;
        };

        let Some(polygons) = feature_polygons(feature) else {
            log::warn!("Skipping boundary feature {i} ({name}): no polygon geometry");
            continue;
        };

        if let Some((_, existing)) = regions.iter_mut().find(|(id, _)| *id == name) {
            log::warn!("Boundary feature {i} repeats region {name}, merging polygons");
            existing.extend(polygons.0);
        } else {
            regions.push((name, polygons.0));
        }
    }

    log::debug!(
        "Kept {} of {total} boundary features ({})",
        regions.len(),
        source.describe_filter()
    );

    Ok(regions
        .into_iter()
        .map(|(name, polygons)| Region::new(name, MultiPolygon(polygons)))
        .collect())
}

fn matches_state(feature: &Feature, source: &BoundarySource) -> bool {
    let Some(state) = &source.state else {
        return true;
    };

    feature
        .property(&source.state_property)
        .and_then(property_text)
        .is_some_and(|value| value == *state)
}

/// Reads a property as trimmed, non-empty text. Numeric codes are
/// accepted so that `34` and `"34"` compare equal.
fn property_text(value: &JsonValue) -> Option<String> {
    let text = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn feature_polygons(feature: Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry?;
    let geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    to_multipolygon(geometry)
}
