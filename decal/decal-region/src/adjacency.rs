//! Face-to-face adjacency through shared edges.

use decal_types::MeshSnapshot;
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::error::{AdjacencyError, AdjacencyResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for building a [`FaceAdjacency`].
///
/// # Example
///
/// ```
/// use decal_region::AdjacencyParams;
///
/// // Relaxed: non-manifold edges link every face that shares them
/// assert!(AdjacencyParams::default().max_non_manifold_edges.is_none());
///
/// // Reject any non-manifold edge
/// assert_eq!(AdjacencyParams::strict().max_non_manifold_edges, Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjacencyParams {
    /// Fail the build if the mesh has more non-manifold edges than this.
    /// `None` accepts any number.
    pub max_non_manifold_edges: Option<usize>,
}

impl AdjacencyParams {
    /// Parameters that reject any non-manifold edge.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_non_manifold_edges: Some(0),
        }
    }

    /// Set the non-manifold edge limit.
    #[must_use]
    pub const fn with_max_non_manifold_edges(mut self, limit: usize) -> Self {
        self.max_non_manifold_edges = Some(limit);
        self
    }
}

/// Which faces share an edge with which.
///
/// Two faces are adjacent when they share both endpoints of an edge,
/// regardless of winding. Sharing a single vertex does not count.
///
/// # Example
///
/// ```
/// use decal_region::{AdjacencyParams, FaceAdjacency};
/// use decal_types::unit_cube;
///
/// let adjacency = FaceAdjacency::build(&unit_cube(), &AdjacencyParams::default()).unwrap();
///
/// // Every triangle of a closed cube has exactly three edge neighbors
/// assert_eq!(adjacency.neighbors(0), &[1, 4, 10]);
/// assert_eq!(adjacency.boundary_edge_count(), 0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceAdjacency {
    neighbors: Vec<SmallVec<[u32; 6]>>,
    edge_count: usize,
    boundary_edges: usize,
    non_manifold_edges: usize,
}

impl FaceAdjacency {
    /// Build the adjacency of a mesh snapshot.
    ///
    /// # Errors
    ///
    /// - [`AdjacencyError::InvalidMesh`] if the snapshot fails validation.
    /// - [`AdjacencyError::NonManifold`] if the mesh has more non-manifold
    ///   edges than [`AdjacencyParams::max_non_manifold_edges`].
    pub fn build(mesh: &MeshSnapshot, params: &AdjacencyParams) -> AdjacencyResult<Self> {
        mesh.validate()?;

        let edge_to_faces = build_edge_to_faces(mesh);

        let mut neighbors: Vec<SmallVec<[u32; 6]>> = vec![SmallVec::new(); mesh.face_count()];
        let mut boundary_edges = 0;
        let mut non_manifold_edges = 0;

        for faces in edge_to_faces.values() {
            match faces.len() {
                1 => boundary_edges += 1,
                2 => {}
                _ => non_manifold_edges += 1,
            }
            for &a in faces {
                for &b in faces {
                    if a != b && !neighbors[a as usize].contains(&b) {
                        neighbors[a as usize].push(b);
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        if non_manifold_edges > 0 {
            warn!(
                non_manifold_edges,
                "Mesh has edges shared by more than two faces"
            );
        }
        if let Some(limit) = params.max_non_manifold_edges {
            if non_manifold_edges > limit {
                return Err(AdjacencyError::NonManifold {
                    edges: non_manifold_edges,
                    limit,
                });
            }
        }

        info!(
            faces = neighbors.len(),
            edges = edge_to_faces.len(),
            boundary_edges,
            non_manifold_edges,
            "Built face adjacency"
        );

        Ok(Self {
            neighbors,
            edge_count: edge_to_faces.len(),
            boundary_edges,
            non_manifold_edges,
        })
    }

    /// Number of faces covered.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Faces sharing an edge with `face`, in ascending order.
    ///
    /// Unknown face ids have no neighbors.
    #[must_use]
    pub fn neighbors(&self, face: u32) -> &[u32] {
        match self.neighbors.get(face as usize) {
            Some(n) => n,
            None => &[],
        }
    }

    /// Whether two faces share an edge.
    #[must_use]
    pub fn are_adjacent(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of edges used by exactly one face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.boundary_edges
    }

    /// Number of edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edges
    }

    /// Whether every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Map each undirected edge to the faces using it.
///
/// Collapsed edges (both endpoints the same vertex) are ignored.
fn build_edge_to_faces(mesh: &MeshSnapshot) -> HashMap<(u32, u32), SmallVec<[u32; 2]>> {
    let mut edge_to_faces: HashMap<(u32, u32), SmallVec<[u32; 2]>> = HashMap::new();

    for (face_id, face) in (0u32..).zip(&mesh.faces) {
        for (a, b) in face.edges() {
            if a == b {
                continue;
            }
            let faces = edge_to_faces.entry(normalize_edge(a, b)).or_default();
            if !faces.contains(&face_id) {
                faces.push(face_id);
            }
        }
    }

    edge_to_faces
}

/// Normalize an edge to have the smaller vertex first.
const fn normalize_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use decal_types::{quad_cube, unit_cube, Face, Point3};

    fn strip(n: u32) -> MeshSnapshot {
        // A row of n quads split into 2n triangles along the x axis.
        let mut vertices = Vec::new();
        for i in 0..=n {
            vertices.push(Point3::new(f64::from(i), 0.0, 0.0));
            vertices.push(Point3::new(f64::from(i), 1.0, 0.0));
        }
        let mut tris = Vec::new();
        for i in 0..n {
            let a = 2 * i;
            tris.push([a, a + 2, a + 3]);
            tris.push([a, a + 3, a + 1]);
        }
        MeshSnapshot::from_triangles(vertices, &tris)
    }

    #[test]
    fn cube_is_closed() {
        let adjacency = FaceAdjacency::build(&unit_cube(), &AdjacencyParams::default()).unwrap();
        assert_eq!(adjacency.face_count(), 12);
        assert_eq!(adjacency.edge_count(), 18);
        assert!(adjacency.is_closed_manifold());
        for face in 0..12 {
            assert_eq!(adjacency.neighbors(face).len(), 3, "face {face}");
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let adjacency = FaceAdjacency::build(&unit_cube(), &AdjacencyParams::default()).unwrap();
        for a in 0..12 {
            for &b in adjacency.neighbors(a) {
                assert!(adjacency.are_adjacent(b, a));
            }
        }
    }

    #[test]
    fn quad_faces_share_edges() {
        let adjacency = FaceAdjacency::build(&quad_cube(), &AdjacencyParams::default()).unwrap();
        // Bottom touches the four sides but not the top
        assert_eq!(adjacency.neighbors(0), &[2, 3, 4, 5]);
        assert!(!adjacency.are_adjacent(0, 1));
        assert_eq!(adjacency.edge_count(), 12);
    }

    #[test]
    fn shared_vertex_is_not_adjacency() {
        let mesh = MeshSnapshot::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.0, -1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 3, 4]],
        );
        let adjacency = FaceAdjacency::build(&mesh, &AdjacencyParams::default()).unwrap();
        assert!(adjacency.neighbors(0).is_empty());
        assert!(adjacency.neighbors(1).is_empty());
        assert_eq!(adjacency.boundary_edge_count(), 6);
    }

    #[test]
    fn open_strip_has_boundary() {
        let adjacency = FaceAdjacency::build(&strip(3), &AdjacencyParams::default()).unwrap();
        // Triangles chain 1-0-3-2-5-4 across the diagonals and quad seams
        assert_eq!(adjacency.neighbors(1), &[0]);
        assert_eq!(adjacency.neighbors(0), &[1, 3]);
        assert_eq!(adjacency.neighbors(3), &[0, 2]);
        // Perimeter of a 3x1 rectangle
        assert_eq!(adjacency.boundary_edge_count(), 8);
        assert!(!adjacency.is_closed_manifold());
    }

    #[test]
    fn non_manifold_edge_links_all_faces() {
        // Three fins sharing the edge 0-1
        let mesh = MeshSnapshot::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, 0.0, 1.0),
                Point3::new(0.5, -1.0, 0.0),
            ],
            &[[0, 1, 2], [1, 0, 3], [0, 1, 4]],
        );
        let adjacency = FaceAdjacency::build(&mesh, &AdjacencyParams::default()).unwrap();
        assert_eq!(adjacency.non_manifold_edge_count(), 1);
        assert_eq!(adjacency.neighbors(0), &[1, 2]);
        assert_eq!(adjacency.neighbors(2), &[0, 1]);

        let err = FaceAdjacency::build(&mesh, &AdjacencyParams::strict()).unwrap_err();
        assert_eq!(err, AdjacencyError::NonManifold { edges: 1, limit: 0 });

        let lenient = AdjacencyParams::strict().with_max_non_manifold_edges(1);
        assert!(FaceAdjacency::build(&mesh, &lenient).is_ok());
    }

    #[test]
    fn invalid_mesh_is_rejected() {
        let mut mesh = unit_cube();
        mesh.faces.push(Face::triangle(0, 1, 42));
        assert!(matches!(
            FaceAdjacency::build(&mesh, &AdjacencyParams::default()),
            Err(AdjacencyError::InvalidMesh(_))
        ));
    }

    #[test]
    fn unknown_face_has_no_neighbors() {
        let adjacency = FaceAdjacency::build(&unit_cube(), &AdjacencyParams::default()).unwrap();
        assert!(adjacency.neighbors(99).is_empty());
        assert!(!adjacency.are_adjacent(99, 0));
    }

    #[test]
    fn normalize_edge_orders_vertices() {
        assert_eq!(normalize_edge(5, 2), (2, 5));
        assert_eq!(normalize_edge(2, 5), (2, 5));
    }
}
