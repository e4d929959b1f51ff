//! kakera-engine: pixel-graph image partitioning (sans-IO).
//!
//! Splits a raster image into disjoint pixel regions two ways, over one
//! shared disjoint-set forest:
//!
//! - **Connected components** — pixels belong together iff they are
//!   linked through 4-neighbor adjacencies whose colors are exactly
//!   equal.
//! - **Segmentation** — a minimum spanning forest over the
//!   color-distance-weighted adjacency graph, contracted greedily until
//!   a requested number of regions remains.
//!
//! Both runs recolor the buffer in place through a [`ColorScheme`]
//! collaborator, report their union and component counts, and are fully
//! deterministic (equal-weight edges are ordered by endpoint ids, and
//! unions always keep the numerically smaller root).
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! pixel buffers and returns structured data. Decoding, file output,
//! and the command line live in `kakera-cli`.

pub mod diagnostics;
pub mod edges;
pub mod forest;
pub mod grid;
pub mod label;
pub mod recolor;
pub mod segment;
pub mod types;

pub use recolor::{ColorScheme, DistinctColors};
pub use segment::DEFAULT_REGIONS;
pub use types::{Dimensions, EngineError, PartitionResult, RgbImage};

use std::time::Instant;

use crate::diagnostics::{PartitionDiagnostics, StageDiagnostics, StageMetrics};
use crate::forest::PixelForest;
use crate::grid::PixelGrid;
use crate::label::ComponentTable;

/// The partitioning engine for one image size.
///
/// Owns the grid arithmetic and the single reusable forest both
/// algorithms share. Each run populates the forest, derives the dense
/// component labels, recolors the buffer, and resets the forest, so one
/// `Partitioner` can serve any number of runs over same-sized buffers.
#[derive(Debug)]
pub struct Partitioner {
    grid: PixelGrid,
    forest: PixelForest,
}

impl Partitioner {
    /// Create a partitioner for images of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyImage`] if either dimension is zero.
    pub fn new(dimensions: Dimensions) -> Result<Self, EngineError> {
        if dimensions.pixel_count() == 0 {
            return Err(EngineError::EmptyImage);
        }
        let grid = PixelGrid::new(dimensions);
        let forest = PixelForest::new(grid.len());
        Ok(Self { grid, forest })
    }

    /// Create a partitioner sized for an existing image.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyImage`] if the image has no pixels.
    pub fn for_image(image: &RgbImage) -> Result<Self, EngineError> {
        Self::new(Dimensions::of(image))
    }

    /// The dimensions this partitioner was built for.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Compute exact connected components and recolor the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DimensionMismatch`] if the image does not
    /// match the partitioner's dimensions.
    pub fn components(
        &mut self,
        image: &mut RgbImage,
        scheme: &dyn ColorScheme,
    ) -> Result<PartitionResult, EngineError> {
        self.components_with_diagnostics(image, scheme)
            .map(|(result, _)| result)
    }

    /// [`components`](Self::components) with per-stage diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DimensionMismatch`] if the image does not
    /// match the partitioner's dimensions.
    pub fn components_with_diagnostics(
        &mut self,
        image: &mut RgbImage,
        scheme: &dyn ColorScheme,
    ) -> Result<(PartitionResult, PartitionDiagnostics), EngineError> {
        let total_start = Instant::now();
        self.check_dimensions(image)?;

        let start = Instant::now();
        let union_count = label::merge_equal_neighbors(image, &self.grid, &mut self.forest);
        let merge = StageDiagnostics {
            duration: start.elapsed(),
            metrics: StageMetrics::MergeNeighbors {
                union_count,
                pixel_count: self.grid.len(),
            },
        };

        let (result, index, recolor) = self.finish(image, scheme, union_count);
        let diagnostics = PartitionDiagnostics {
            merge: Some(merge),
            edge_build: None,
            carve: None,
            index,
            recolor,
            total_duration: total_start.elapsed(),
        };
        Ok((result, diagnostics))
    }

    /// Segment the image into `regions` color regions and recolor.
    ///
    /// The realized region count is `min(regions, pixel count)`:
    /// requesting more regions than pixels simply leaves every pixel its
    /// own region.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRegionCount`] if `regions` is zero
    /// and [`EngineError::DimensionMismatch`] if the image does not
    /// match the partitioner's dimensions.
    pub fn segment(
        &mut self,
        image: &mut RgbImage,
        regions: usize,
        scheme: &dyn ColorScheme,
    ) -> Result<PartitionResult, EngineError> {
        self.segment_with_diagnostics(image, regions, scheme)
            .map(|(result, _)| result)
    }

    /// [`segment`](Self::segment) with per-stage diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRegionCount`] if `regions` is zero
    /// and [`EngineError::DimensionMismatch`] if the image does not
    /// match the partitioner's dimensions.
    pub fn segment_with_diagnostics(
        &mut self,
        image: &mut RgbImage,
        regions: usize,
        scheme: &dyn ColorScheme,
    ) -> Result<(PartitionResult, PartitionDiagnostics), EngineError> {
        let total_start = Instant::now();
        if regions == 0 {
            return Err(EngineError::InvalidRegionCount(regions));
        }
        self.check_dimensions(image)?;

        let start = Instant::now();
        let edge_list = edges::weighted_edges(image, &self.grid);
        let edge_build = StageDiagnostics {
            duration: start.elapsed(),
            metrics: StageMetrics::BuildEdges {
                edge_count: edge_list.len(),
            },
        };

        let start = Instant::now();
        let union_count = segment::carve(&mut self.forest, &edge_list, regions);
        let carve = StageDiagnostics {
            duration: start.elapsed(),
            metrics: StageMetrics::CarveForest {
                union_count,
                regions_requested: regions,
                regions_remaining: self.grid.len() - union_count,
            },
        };

        let (result, index, recolor) = self.finish(image, scheme, union_count);
        let diagnostics = PartitionDiagnostics {
            merge: None,
            edge_build: Some(edge_build),
            carve: Some(carve),
            index,
            recolor,
            total_duration: total_start.elapsed(),
        };
        Ok((result, diagnostics))
    }

    fn check_dimensions(&self, image: &RgbImage) -> Result<(), EngineError> {
        let actual = Dimensions::of(image);
        if actual == self.grid.dimensions() {
            Ok(())
        } else {
            Err(EngineError::DimensionMismatch {
                expected: self.grid.dimensions(),
                actual,
            })
        }
    }

    /// Shared tail of both runs: index the components, recolor the
    /// buffer, and reset the forest for the next run.
    fn finish(
        &mut self,
        image: &mut RgbImage,
        scheme: &dyn ColorScheme,
        union_count: usize,
    ) -> (PartitionResult, StageDiagnostics, StageDiagnostics) {
        let start = Instant::now();
        let table = ComponentTable::build(&self.forest);
        let labels = label::per_pixel_labels(&mut self.forest, &table);
        let component_count = table.len();
        let index = StageDiagnostics {
            duration: start.elapsed(),
            metrics: StageMetrics::IndexComponents { component_count },
        };

        let start = Instant::now();
        recolor::apply(image, &labels, scheme);
        let recolor = StageDiagnostics {
            duration: start.elapsed(),
            metrics: StageMetrics::Recolor {
                pixel_count: labels.len(),
            },
        };

        // Every union merged exactly two of the initial singleton trees.
        debug_assert_eq!(union_count + component_count, self.grid.len());
        self.forest.reset();

        let result = PartitionResult {
            union_count,
            component_count,
            labels,
            dimensions: self.grid.dimensions(),
        };
        (result, index, recolor)
    }
}
