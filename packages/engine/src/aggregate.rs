//! County assignment and tallying.

use collab_map_geography_models::CountyTally;
use collab_map_spatial::{Region, RegionIndex};

use crate::filter::Located;

/// Assigns each located activity to the first region (in region order)
/// whose polygon covers it. Boundary points count as covered.
#[must_use]
pub fn assign_regions(activities: &[Located<'_>], index: &RegionIndex) -> Vec<Option<usize>> {
    activities
        .iter()
        .map(|activity| {
            let position = index.locate(activity.point);
            if position.is_none() {
                log::debug!(
                    "Activity '{}' at ({}, {}) matched no region",
                    activity.record.activity_name(),
                    activity.point.y(),
                    activity.point.x()
                );
            }
            position
        })
        .collect()
}

/// Counts assignments per region. Every region gets an entry, in region
/// order; percentages use the number of assignments as the denominator.
#[must_use]
pub fn tally_regions(assignments: &[Option<usize>], regions: &[Region]) -> CountyTally {
    let mut counts = vec![0_u64; regions.len()];
    let mut unassigned = 0_u64;

    for assignment in assignments {
        match assignment.and_then(|position| counts.get_mut(position)) {
            Some(count) => *count += 1,
            None => unassigned += 1,
        }
    }

    if unassigned > 0 {
        log::warn!(
            "{unassigned} of {} filtered activities fell inside the boundary but matched no region",
            assignments.len()
        );
    }

    CountyTally::from_counts(
        regions
            .iter()
            .map(|region| region.id().to_string())
            .zip(counts),
        assignments.len() as u64,
        unassigned,
    )
}
