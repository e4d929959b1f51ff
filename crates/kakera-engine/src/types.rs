//! Shared types for the kakera partitioning engine.

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can reference the pixel
/// buffer without depending on `image` directly.
pub use image::RgbImage;

/// Re-export the `Rgb` pixel type for the same reason.
pub use image::Rgb;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an existing pixel buffer.
    #[must_use]
    pub fn of(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }

    /// Total pixel count (`width * height`).
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result of one partitioning run (components or segmentation).
///
/// The buffer itself is recolored in place; this carries everything else
/// a caller needs: the counts and the dense per-pixel component labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionResult {
    /// Number of union operations performed while building the forest.
    pub union_count: usize,

    /// Number of disjoint regions in the final partition.
    ///
    /// Always satisfies `union_count + component_count == pixel count`:
    /// the forest starts as one singleton tree per pixel and every union
    /// merges exactly two trees.
    pub component_count: usize,

    /// Dense zero-based component index for every pixel, in row-major
    /// order. Indices are assigned in scan order of first encounter, so
    /// component 0 always contains the top-left-most root.
    pub labels: Vec<usize>,

    /// Dimensions of the partitioned image.
    pub dimensions: Dimensions,
}

impl PartitionResult {
    /// The component label at grid position `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    #[must_use]
    pub fn label_at(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.dimensions.width && y < self.dimensions.height,
            "({x}, {y}) is outside the {} image",
            self.dimensions,
        );
        self.labels[y as usize * self.dimensions.width as usize + x as usize]
    }
}

/// Errors reported by the partitioning engine.
///
/// Only caller-contract violations surface as errors; malformed pixel
/// identifiers inside the engine are programming errors and panic
/// instead (see the `# Panics` sections on the individual operations).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The image has zero width or zero height.
    #[error("image has no pixels (zero width or height)")]
    EmptyImage,

    /// A non-positive region count was requested for segmentation.
    ///
    /// Zero regions has no defined meaning, so the engine rejects it
    /// outright rather than clamping. Requesting more regions than there
    /// are pixels is fine: the realized count saturates at the pixel
    /// count.
    #[error("cannot segment into {0} regions (at least 1 required)")]
    InvalidRegionCount(usize),

    /// The image passed to a run does not match the partitioner's grid.
    #[error("image is {actual} but the partitioner was built for {expected}")]
    DimensionMismatch {
        /// Dimensions the partitioner was constructed with.
        expected: Dimensions,
        /// Dimensions of the image actually supplied.
        actual: Dimensions,
    },
}
