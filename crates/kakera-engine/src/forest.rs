//! Disjoint-set forest over pixel identifiers.
//!
//! One up-tree per pixel: each entry holds its parent's pixel id, or the
//! root sentinel when the pixel currently heads its own tree. Both
//! partitioning algorithms share this structure — they need identical
//! find/union semantics, so there is exactly one implementation, reused
//! across runs via [`PixelForest::reset`].
//!
//! The union policy is deliberately content-independent: the tree rooted
//! at the numerically larger id is always attached under the smaller, so
//! every root is the minimum pixel id of its tree and results are
//! reproducible run to run. This is not union-by-rank — tree depth is
//! unbounded in the worst case, which caps the grid sizes the engine is
//! comfortable with. Path compression in [`PixelForest::find`] keeps
//! repeat traversals cheap without changing any observable result.

/// Parent-slot sentinel marking a pixel as the root of its tree.
const ROOT: usize = usize::MAX;

/// A forest of up-trees partitioning pixel identifiers into disjoint sets.
#[derive(Debug, Clone)]
pub struct PixelForest {
    parent: Vec<usize>,
}

impl PixelForest {
    /// Create a forest of `len` singleton trees, one per pixel.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![ROOT; len],
        }
    }

    /// Number of pixels the forest was built for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the forest covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns `true` if `id` currently heads its own tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid pixel identifier.
    #[must_use]
    pub fn is_root(&self, id: usize) -> bool {
        self.parent[id] == ROOT
    }

    /// The root of the tree containing `id`.
    ///
    /// Iterative parent-chase; the parent relation is acyclic by
    /// construction, so this always terminates. Visited pixels are
    /// re-pointed directly at the discovered root (path compression) — a
    /// traversal-cost optimization only, invisible to callers.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid pixel identifier.
    #[must_use = "find returns the root; it only mutates traversal shortcuts"]
    pub fn find(&mut self, id: usize) -> usize {
        let mut root = id;
        while self.parent[root] != ROOT {
            root = self.parent[root];
        }

        let mut cur = id;
        while self.parent[cur] != ROOT {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }

        root
    }

    /// Merge the trees headed by roots `a` and `b`.
    ///
    /// The larger root is attached under the smaller, so the smaller
    /// pixel id always survives as the merged tree's root. Passing the
    /// same root twice is a no-op; callers that count unions must check
    /// `find` results first and skip such pairs.
    ///
    /// # Panics
    ///
    /// Panics if either argument is not a valid pixel identifier.
    pub fn union(&mut self, a: usize, b: usize) {
        debug_assert!(self.is_root(a), "union argument {a} is not a root");
        debug_assert!(self.is_root(b), "union argument {b} is not a root");
        if a < b {
            self.parent[b] = a;
        } else if b < a {
            self.parent[a] = b;
        }
    }

    /// Restore every pixel to being its own root.
    ///
    /// Required between runs: component tables derived from a previous
    /// run's forest go stale as soon as new unions happen.
    pub fn reset(&mut self) {
        self.parent.fill(ROOT);
    }
}
