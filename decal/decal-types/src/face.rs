//! Polygon faces.

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon face as an ordered list of vertex indices.
///
/// Triangles and quads are stored inline; larger polygons spill to the heap.
/// Winding is counter-clockwise when viewed from outside.
///
/// # Example
///
/// ```
/// use decal_types::Face;
///
/// let quad = Face::new([0, 1, 2, 3]);
/// assert_eq!(quad.len(), 4);
///
/// let edges: Vec<_> = quad.edges().collect();
/// assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    indices: SmallVec<[u32; 4]>,
}

impl Face {
    /// Create a face from vertex indices.
    #[must_use]
    pub fn new(indices: impl IntoIterator<Item = u32>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Create a triangle face.
    #[inline]
    #[must_use]
    pub fn triangle(v0: u32, v1: u32, v2: u32) -> Self {
        Self::new([v0, v1, v2])
    }

    /// Vertex indices in winding order.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices in the face.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the face has no vertices at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether this face is a triangle.
    #[inline]
    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.indices.len() == 3
    }

    /// Iterate over the boundary edges as directed `(from, to)` pairs,
    /// including the closing edge back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// Iterate over the fan triangulation `(v0, vi, vi+1)` of this face.
    ///
    /// Yields nothing for faces with fewer than three vertices.
    pub fn fan(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let n = self.indices.len();
        (1..n.saturating_sub(1))
            .map(move |i| [self.indices[0], self.indices[i], self.indices[i + 1]])
    }
}

impl From<[u32; 3]> for Face {
    fn from(tri: [u32; 3]) -> Self {
        Self::new(tri)
    }
}

impl From<[u32; 4]> for Face {
    fn from(quad: [u32; 4]) -> Self {
        Self::new(quad)
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Self::new(indices)
    }
}
