#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County boundary loading for the collaboratory map.
//!
//! Reads a `GeoJSON` `FeatureCollection` of county polygons (such as the
//! nationwide county file keyed by state FIPS), keeps the features for one
//! state, and produces [`Boundaries`]: the ordered region list, the combined
//! boundary mask, and the bounds used to frame the map. Loading happens once
//! at startup; everything produced here is immutable afterwards.

pub mod ingest;
pub mod source;

use collab_map_geography_models::{MapBounds, MapView};
use collab_map_spatial::{BoundaryMask, Region, RegionIndex};
use thiserror::Error;

pub use source::BoundarySource;

/// Errors that can occur while loading boundaries.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading the boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The boundary file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The `GeoJSON` has an unexpected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },

    /// Nothing usable was left after filtering.
    #[error("No boundary regions found ({context})")]
    NoRegions {
        /// Where the regions were expected to come from.
        context: String,
    },
}

/// The loaded region set and the mask derived from it.
pub struct Boundaries {
    index: RegionIndex,
    mask: BoundaryMask,
}

impl Boundaries {
    /// Builds boundaries whose mask is the collection of all region
    /// polygons.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::NoRegions`] if `regions` is empty.
    pub fn new(regions: Vec<Region>) -> Result<Self, GeoError> {
        let mask = BoundaryMask::from_regions(&regions);
        Self::with_mask(regions, mask)
    }

    /// Builds boundaries with a separately supplied mask (for example a
    /// state outline). Points inside the mask that match no region are
    /// reported as unassigned during aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::NoRegions`] if `regions` is empty or the mask
    /// has no polygons.
    pub fn with_mask(regions: Vec<Region>, mask: BoundaryMask) -> Result<Self, GeoError> {
        if regions.is_empty() {
            return Err(GeoError::NoRegions {
                context: "empty region list".to_string(),
            });
        }
        if mask.is_empty() {
            return Err(GeoError::NoRegions {
                context: "empty boundary mask".to_string(),
            });
        }

        Ok(Self {
            index: RegionIndex::new(regions),
            mask,
        })
    }

    /// Regions in list order (the first-match tie-break order).
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        self.index.regions()
    }

    #[must_use]
    pub const fn index(&self) -> &RegionIndex {
        &self.index
    }

    #[must_use]
    pub const fn mask(&self) -> &BoundaryMask {
        &self.mask
    }

    /// Bounding box of the mask.
    #[must_use]
    pub fn bounds(&self) -> Option<MapBounds> {
        self.mask.bounds().map(|rect| {
            MapBounds::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
        })
    }

    /// Center and fit bounds for the initial map view.
    #[must_use]
    pub fn view(&self) -> Option<MapView> {
        self.bounds().map(MapView::from)
    }
}

/// Reads and parses the boundary file described by `source`.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or parsed, or if no
/// region survives the state filter.
pub fn load_boundaries(source: &BoundarySource) -> Result<Boundaries, GeoError> {
    log::info!("Loading boundaries from {}", source.path.display());
    let text = std::fs::read_to_string(&source.path)?;

    let regions = ingest::parse_regions(&text, source)?;
    if regions.is_empty() {
        return Err(GeoError::NoRegions {
            context: format!("{} ({})", source.path.display(), source.describe_filter()),
        });
    }

    log::info!(
        "Loaded {} regions ({})",
        regions.len(),
        source.describe_filter()
    );

    Boundaries::new(regions)
}
