//! Parameters for spatial index construction and ray casting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for building a [`SpatialIndex`](crate::SpatialIndex).
///
/// # Example
///
/// ```
/// use decal_bvh::IndexParams;
///
/// let params = IndexParams::default();
/// assert_eq!(params.max_leaf_size, 4);
///
/// let fine = IndexParams::default()
///     .with_max_leaf_size(1)
///     .sequential();
/// assert!(fine.parallel_threshold.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexParams {
    /// Maximum triangles per leaf node.
    /// Smaller values create deeper trees with fewer triangle tests per cast.
    pub max_leaf_size: usize,

    /// Triangles this close to collinear are left out of the index; see
    /// [`Triangle::is_degenerate`](decal_types::Triangle::is_degenerate).
    /// Relative to edge lengths, so independent of mesh scale.
    pub degenerate_tolerance: f64,

    /// Tolerance for parallel-ray rejection in the triangle test, relative
    /// to the edge and direction lengths.
    pub epsilon: f64,

    /// Build subtrees in parallel (rayon) once a subtree holds at least this
    /// many triangles. `None` always builds sequentially.
    pub parallel_threshold: Option<usize>,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            max_leaf_size: 4,
            degenerate_tolerance: 1e-20,
            epsilon: 1e-12,
            parallel_threshold: Some(50_000),
        }
    }
}

impl IndexParams {
    /// Parameters tuned for meshes with hundreds of thousands of faces:
    /// slightly larger leaves and an earlier switch to parallel construction.
    #[must_use]
    pub fn large_mesh() -> Self {
        Self {
            max_leaf_size: 8,
            parallel_threshold: Some(10_000),
            ..Self::default()
        }
    }

    /// Set the maximum leaf size (clamped to at least 1 at build time).
    #[must_use]
    pub const fn with_max_leaf_size(mut self, size: usize) -> Self {
        self.max_leaf_size = size;
        self
    }

    /// Set the degenerate-triangle tolerance.
    #[must_use]
    pub const fn with_degenerate_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }

    /// Set the parallel-ray epsilon.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the triangle count at which subtrees are built in parallel.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Always build on the calling thread.
    #[must_use]
    pub const fn sequential(mut self) -> Self {
        self.parallel_threshold = None;
        self
    }
}
