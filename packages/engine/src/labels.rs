//! Percentage labels placed at region centroids.

use collab_map_geography_models::{CountyLabel, CountyTally, format_percentage};
use collab_map_spatial::Region;

/// One label per region holding at least one filtered activity.
///
/// `tally` must list `regions` in the same order, as
/// [`crate::aggregate::tally_regions`] does. Regions without a centroid
/// get no label.
#[must_use]
pub fn county_labels(tally: &CountyTally, regions: &[Region]) -> Vec<CountyLabel> {
    regions
        .iter()
        .zip(&tally.regions)
        .filter(|(_, entry)| entry.count > 0)
        .filter_map(|(region, entry)| {
            let (latitude, longitude) = region.label_anchor()?;
            Some(CountyLabel {
                region_id: entry.region_id.clone(),
                latitude,
                longitude,
                percentage: format_percentage(entry.percentage),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tally_regions;
    use crate::test_support::regions;

    #[test]
    fn labels_sit_at_centroids_and_skip_empty_regions() {
        let regions = regions();
        let tally = tally_regions(&[Some(1), Some(1), Some(1)], &regions);

        let labels = county_labels(&tally, &regions);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].region_id, "Mercer");
        assert_eq!(labels[0].percentage, "100.0%");
        assert!((labels[0].longitude - -74.0).abs() < 1e-9);
        assert!((labels[0].latitude - 40.0).abs() < 1e-9);
    }

    #[test]
    fn one_decimal_place() {
        let regions = regions();
        let tally = tally_regions(&[Some(0), Some(1), Some(1)], &regions);

        let labels = county_labels(&tally, &regions);
        let texts: Vec<_> = labels.iter().map(|l| l.percentage.as_str()).collect();
        assert_eq!(texts, vec!["33.3%", "66.7%"]);
    }

    #[test]
    fn no_labels_for_an_empty_selection() {
        let regions = regions();
        assert!(county_labels(&tally_regions(&[], &regions), &regions).is_empty());
    }
}
