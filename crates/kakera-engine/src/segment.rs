//! Minimum-spanning-forest segmentation, truncated at a region count.
//!
//! Kruskal's greedy edge selection, stopped early: edges are consumed in
//! ascending weight order, each cross-tree edge contracts two trees into
//! one, and the loop ends as soon as the requested number of trees
//! remains. The trees left standing are exactly the regions Kruskal
//! would have merged last — the largest color "cuts" in the minimum
//! spanning tree stay uncontracted, giving single-linkage-style regions
//! ordered by color similarity.

use crate::edges::Edge;
use crate::forest::PixelForest;

/// Default region count for segmentation runs.
pub const DEFAULT_REGIONS: usize = 25;

/// Contract the forest down to `regions` trees.
///
/// Consumes edges in their sorted order; every edge whose endpoint roots
/// differ triggers a union. Stops when `regions` trees remain or the
/// edge list is exhausted. With the full adjacency edge list every pixel
/// is reachable, so exhaustion only happens when `regions` exceeds the
/// pixel count — the realized region count is `min(regions, pixels)`.
///
/// Returns the number of unions performed. Callers validate
/// `regions >= 1` before reaching this loop.
pub fn carve(forest: &mut PixelForest, edges: &[Edge], regions: usize) -> usize {
    debug_assert!(regions >= 1, "region count must be positive");

    let mut trees = forest.len();
    let mut union_count = 0;

    for edge in edges {
        if trees <= regions {
            break;
        }
        let a = forest.find(edge.a);
        let b = forest.find(edge.b);
        if a != b {
            forest.union(a, b);
            trees -= 1;
            union_count += 1;
        }
    }

    union_count
}
