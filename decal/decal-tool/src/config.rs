//! Configuration for a decal tool session.

use decal_bvh::IndexParams;
use decal_region::AdjacencyParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`DecalTool`](crate::DecalTool) session.
///
/// # Example
///
/// ```
/// use decal_tool::DecalConfig;
///
/// let config = DecalConfig::default();
/// assert!((config.max_ray_distance - 9999.9).abs() < 1e-9);
///
/// let config = DecalConfig::large_mesh().with_max_ray_distance(500.0);
/// assert_eq!(config.index.max_leaf_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecalConfig {
    /// Spatial index construction.
    pub index: IndexParams,

    /// Face adjacency construction.
    pub adjacency: AdjacencyParams,

    /// Hits farther than this from the ray origin are ignored.
    pub max_ray_distance: f64,

    /// The ray starts this far in front of the camera, along its view axis.
    pub ray_origin_offset: f64,
}

impl Default for DecalConfig {
    fn default() -> Self {
        Self {
            index: IndexParams::default(),
            adjacency: AdjacencyParams::default(),
            max_ray_distance: 9999.9,
            ray_origin_offset: 1.0,
        }
    }
}

impl DecalConfig {
    /// Configuration that refuses meshes with non-manifold edges.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            adjacency: AdjacencyParams::strict(),
            ..Self::default()
        }
    }

    /// Configuration tuned for very large meshes.
    #[must_use]
    pub fn large_mesh() -> Self {
        Self {
            index: IndexParams::large_mesh(),
            ..Self::default()
        }
    }

    /// Set the spatial index parameters.
    #[must_use]
    pub fn with_index(mut self, index: IndexParams) -> Self {
        self.index = index;
        self
    }

    /// Set the adjacency parameters.
    #[must_use]
    pub fn with_adjacency(mut self, adjacency: AdjacencyParams) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Set the maximum ray distance.
    #[must_use]
    pub const fn with_max_ray_distance(mut self, distance: f64) -> Self {
        self.max_ray_distance = distance;
        self
    }

    /// Set how far in front of the camera rays start.
    #[must_use]
    pub const fn with_ray_origin_offset(mut self, offset: f64) -> Self {
        self.ray_origin_offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn presets_differ_where_expected() {
        let default = DecalConfig::default();
        assert_eq!(default.adjacency.max_non_manifold_edges, None);
        assert_eq!(DecalConfig::strict().adjacency.max_non_manifold_edges, Some(0));
        assert_eq!(DecalConfig::large_mesh().index, IndexParams::large_mesh());
        assert_relative_eq!(default.ray_origin_offset, 1.0);
    }

    #[test]
    fn builders_chain() {
        let config = DecalConfig::default()
            .with_ray_origin_offset(0.0)
            .with_index(IndexParams::default().sequential());
        assert_relative_eq!(config.ray_origin_offset, 0.0);
        assert!(config.index.parallel_threshold.is_none());
    }
}
