//! Exact-color connected-component labeling.
//!
//! Two passes over the grid, both in row-major order. The merge pass
//! unions every adjacent pixel pair with exactly equal colors (no
//! tolerance) into the shared forest. The indexing pass then assigns
//! each surviving root a dense zero-based component index in order of
//! first encounter, so component 0 is always the first root found
//! scanning top-to-bottom, left-to-right.

use std::collections::HashMap;

use image::RgbImage;

use crate::forest::PixelForest;
use crate::grid::PixelGrid;

/// Union every equal-color neighbor pair into the forest.
///
/// Each pixel is compared against its right and bottom neighbors only
/// (comparisons falling off the last column or row are skipped), so
/// every adjacency is considered exactly once. Returns the number of
/// unions performed; together with the resulting component count this
/// always sums to the pixel count.
pub fn merge_equal_neighbors(
    image: &RgbImage,
    grid: &PixelGrid,
    forest: &mut PixelForest,
) -> usize {
    let mut union_count = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = image.get_pixel(x, y);

            if x + 1 < grid.width() && color == image.get_pixel(x + 1, y) {
                let a = forest.find(grid.id(x, y));
                let b = forest.find(grid.id(x + 1, y));
                if a != b {
                    forest.union(a, b);
                    union_count += 1;
                }
            }

            if y + 1 < grid.height() && color == image.get_pixel(x, y + 1) {
                let a = forest.find(grid.id(x, y));
                let b = forest.find(grid.id(x, y + 1));
                if a != b {
                    forest.union(a, b);
                    union_count += 1;
                }
            }
        }
    }
    union_count
}

/// Dense component indices for the roots of a fully built forest.
///
/// Built once after all unions of a run are complete; it goes stale if
/// the forest is unioned further, and must be rebuilt after a
/// [`PixelForest::reset`].
#[derive(Debug, Clone)]
pub struct ComponentTable {
    index_by_root: HashMap<usize, usize>,
}

impl ComponentTable {
    /// Scan the forest in pixel-id (row-major) order and hand each root
    /// the next unused index.
    #[must_use]
    pub fn build(forest: &PixelForest) -> Self {
        let mut index_by_root = HashMap::new();
        for id in 0..forest.len() {
            if forest.is_root(id) {
                let next = index_by_root.len();
                index_by_root.insert(id, next);
            }
        }
        Self { index_by_root }
    }

    /// Number of components in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index_by_root.len()
    }

    /// Returns `true` if the table holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_by_root.is_empty()
    }

    /// The dense index assigned to `root`.
    ///
    /// # Panics
    ///
    /// Panics if `root` was not a root of the forest this table was
    /// built from — that is a programming error, not a recoverable
    /// condition.
    #[must_use]
    pub fn index_of(&self, root: usize) -> usize {
        self.index_by_root[&root]
    }
}

/// The dense component index for every pixel, in row-major order.
pub fn per_pixel_labels(forest: &mut PixelForest, table: &ComponentTable) -> Vec<usize> {
    (0..forest.len())
        .map(|id| table.index_of(forest.find(id)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Dimensions;
    use image::Rgb;

    /// Build an image from per-row pixel colors.
    fn image_from_rows(rows: &[&[[u8; 3]]]) -> (RgbImage, PixelGrid) {
        let height = u32::try_from(rows.len()).unwrap();
        let width = u32::try_from(rows[0].len()).unwrap();
        let image = RgbImage::from_fn(width, height, |x, y| {
            Rgb(rows[y as usize][x as usize])
        });
        let grid = PixelGrid::new(Dimensions { width, height });
        (image, grid)
    }

    const A: [u8; 3] = [10, 20, 30];
    const B: [u8; 3] = [200, 100, 0];

    #[test]
    fn uniform_image_merges_into_one_tree() {
        let (image, grid) = image_from_rows(&[&[A, A, A], &[A, A, A]]);
        let mut forest = PixelForest::new(grid.len());
        let unions = merge_equal_neighbors(&image, &grid, &mut forest);
        assert_eq!(unions, grid.len() - 1);
        for id in 0..grid.len() {
            assert_eq!(forest.find(id), 0);
        }
    }

    #[test]
    fn checkerboard_merges_nothing() {
        let (image, grid) = image_from_rows(&[&[A, B], &[B, A]]);
        let mut forest = PixelForest::new(grid.len());
        let unions = merge_equal_neighbors(&image, &grid, &mut forest);
        assert_eq!(unions, 0);
        for id in 0..grid.len() {
            assert!(forest.is_root(id));
        }
    }

    #[test]
    fn near_equal_colors_stay_separate() {
        // Exact equality only — off-by-one channel values do not merge.
        let close = [10, 20, 31];
        let (image, grid) = image_from_rows(&[&[A, close]]);
        let mut forest = PixelForest::new(grid.len());
        assert_eq!(merge_equal_neighbors(&image, &grid, &mut forest), 0);
    }

    #[test]
    fn stripes_form_one_component_each() {
        let (image, grid) = image_from_rows(&[&[A, A, A], &[B, B, B]]);
        let mut forest = PixelForest::new(grid.len());
        let unions = merge_equal_neighbors(&image, &grid, &mut forest);
        assert_eq!(unions, 4);
        assert_eq!(forest.find(2), 0);
        assert_eq!(forest.find(5), 3);
        assert_ne!(forest.find(0), forest.find(3));
    }

    #[test]
    fn u_shape_joins_across_the_scan() {
        // The two vertical arms only meet in the bottom row, so the merge
        // pass has to connect previously separate trees late in the scan.
        let (image, grid) = image_from_rows(&[&[A, B, A], &[A, A, A]]);
        let mut forest = PixelForest::new(grid.len());
        let unions = merge_equal_neighbors(&image, &grid, &mut forest);
        assert_eq!(unions, 4);
        assert_eq!(forest.find(2), 0);
        assert_eq!(forest.find(5), 0);
        assert!(forest.is_root(1));
    }

    #[test]
    fn table_indices_follow_first_encounter_order() {
        let (image, grid) = image_from_rows(&[&[A, B], &[B, A]]);
        let mut forest = PixelForest::new(grid.len());
        merge_equal_neighbors(&image, &grid, &mut forest);
        let table = ComponentTable::build(&forest);
        assert_eq!(table.len(), 4);
        for id in 0..4 {
            assert_eq!(table.index_of(id), id);
        }
    }

    #[test]
    fn labels_cover_every_pixel() {
        let (image, grid) = image_from_rows(&[&[A, A, B], &[B, B, B]]);
        let mut forest = PixelForest::new(grid.len());
        let unions = merge_equal_neighbors(&image, &grid, &mut forest);
        let table = ComponentTable::build(&forest);
        assert_eq!(unions + table.len(), grid.len());

        let labels = per_pixel_labels(&mut forest, &table);
        assert_eq!(labels, vec![0, 0, 1, 1, 1, 1]);
    }

    #[test]
    #[should_panic(expected = "no entry found")]
    fn index_of_non_root_panics() {
        let (image, grid) = image_from_rows(&[&[A, A, A]]);
        let mut forest = PixelForest::new(grid.len());
        merge_equal_neighbors(&image, &grid, &mut forest);
        let table = ComponentTable::build(&forest);
        // Pixel 2 was merged under root 0 and has no index of its own.
        let _ = table.index_of(2);
    }
}
