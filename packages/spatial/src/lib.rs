#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region polygons, the state boundary mask, and point-to-region lookup.
//!
//! Containment everywhere in this crate is boundary inclusive: a point lying
//! exactly on an edge or vertex is inside. Because neighbouring counties
//! share edges, such a point can satisfy more than one region; the
//! [`RegionIndex`] resolves that by returning the region that comes first in
//! list order. An R-tree over region bounding boxes narrows the candidates,
//! but they are always tested in ascending list position, so the result is
//! identical to a linear scan.

use geo::{BoundingRect, Centroid, Intersects, MultiPolygon, Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// Converts any polygonal geometry into a [`MultiPolygon`].
///
/// Returns `None` for non-areal geometries (points, lines, collections).
#[must_use]
pub fn to_multipolygon(geometry: geo::Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        geo::Geometry::Rect(r) => Some(MultiPolygon(vec![r.to_polygon()])),
        _ => None,
    }
}

/// One administrative region (a county) and its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: String,
    geometry: MultiPolygon<f64>,
    bounds: Option<Rect<f64>>,
    centroid: Option<Point<f64>>,
}

impl Region {
    /// Builds a region, deriving its bounding box and centroid.
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        let bounds = geometry.bounding_rect();
        let centroid = geometry.centroid();
        Self {
            id: id.into(),
            geometry,
            bounds,
            centroid,
        }
    }

    /// Region identifier (county name).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Where the region's label goes, as `(latitude, longitude)`: the
    /// centroid in the order map widgets expect. `None` for an empty
    /// geometry.
    #[must_use]
    pub fn label_anchor(&self) -> Option<(f64, f64)> {
        self.centroid.map(|c| (c.y(), c.x()))
    }

    /// Whether the point lies inside or on the boundary of this region.
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        self.bounds.is_some_and(|b| rect_covers(b, point)) && covers(&self.geometry, point)
    }
}

/// The in-scope area: every region polygon taken together.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryMask {
    geometry: MultiPolygon<f64>,
    bounds: Option<Rect<f64>>,
}

impl BoundaryMask {
    #[must_use]
    pub fn new(geometry: MultiPolygon<f64>) -> Self {
        let bounds = geometry.bounding_rect();
        Self { geometry, bounds }
    }

    /// Builds the mask from all polygons of all regions.
    #[must_use]
    pub fn from_regions(regions: &[Region]) -> Self {
        let polygons = regions
            .iter()
            .flat_map(|region| region.geometry.0.iter().cloned())
            .collect();
        Self::new(MultiPolygon(polygons))
    }

    #[must_use]
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Bounding box of the whole mask.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Whether the point lies inside or on the boundary of the mask.
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        self.bounds.is_some_and(|b| rect_covers(b, point)) && covers(&self.geometry, point)
    }
}

/// A region's bounding box stored in the R-tree, pointing back at the
/// region's list position.
struct RegionEnvelope {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for RegionEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Ordered regions with a first-match-wins point lookup.
pub struct RegionIndex {
    regions: Vec<Region>,
    tree: RTree<RegionEnvelope>,
}

impl RegionIndex {
    /// Indexes `regions`, keeping their order as the tie-break order.
    ///
    /// Regions with an empty geometry are kept in the list but can never
    /// match a point.
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        let entries = regions
            .iter()
            .enumerate()
            .filter_map(|(position, region)| {
                region.bounds.map(|rect| RegionEnvelope {
                    position,
                    envelope: rect_envelope(rect),
                })
            })
            .collect();

        Self {
            regions,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Regions in list order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// List position of the first region containing `point`.
    #[must_use]
    pub fn locate(&self, point: Point<f64>) -> Option<usize> {
        let query = AABB::from_point([point.x(), point.y()]);
        let mut candidates: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.position)
            .collect();
        candidates.sort_unstable();

        candidates
            .into_iter()
            .find(|&position| self.regions[position].contains(point))
    }
}

/// Inclusive point-in-polygon over every member polygon.
///
/// Tested polygon by polygon: an even-odd boundary rule over the whole
/// multipolygon would put points on an edge shared by two members outside.
fn covers(geometry: &MultiPolygon<f64>, point: Point<f64>) -> bool {
    geometry
        .0
        .iter()
        .any(|polygon| polygon.intersects(&point.0))
}

fn rect_covers(rect: Rect<f64>, point: Point<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    (min.x..=max.x).contains(&point.x()) && (min.y..=max.y).contains(&point.y())
}

fn rect_envelope(rect: Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}
