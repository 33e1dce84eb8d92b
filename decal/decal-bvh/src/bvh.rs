//! Bounding volume hierarchy over the fan triangles of a mesh snapshot.
//!
//! The hierarchy is built once per selection session by median-splitting
//! triangle centroids along the longest axis, and is read-only afterwards.

use decal_types::{Aabb, MeshSnapshot, Triangle};
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::error::{BuildError, BuildResult};
use crate::params::IndexParams;

/// A fan triangle of a mesh face, with its owning face id.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexedTriangle {
    pub(crate) face: u32,
    pub(crate) triangle: Triangle,
}

/// BVH node containing either leaf triangles or two children.
#[derive(Debug)]
pub(crate) enum BvhNode {
    Leaf {
        bbox: Aabb,
        /// Slots into [`SpatialIndex::triangles`].
        triangles: SmallVec<[u32; 8]>,
    },
    Internal {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    pub(crate) const fn bbox(&self) -> &Aabb {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }
}

/// Bounding volume hierarchy for nearest-hit ray casting against a mesh.
///
/// Each leaf references one or more triangles; every triangle remembers the
/// face id it was fanned from, so a quad face is found whichever half the ray
/// strikes.
///
/// # Example
///
/// ```
/// use decal_bvh::{IndexParams, SpatialIndex};
/// use decal_types::unit_cube;
///
/// let index = SpatialIndex::build(&unit_cube(), &IndexParams::default()).unwrap();
/// assert_eq!(index.triangle_count(), 12);
/// assert_eq!(index.face_count(), 12);
/// ```
#[derive(Debug)]
pub struct SpatialIndex {
    pub(crate) root: BvhNode,
    pub(crate) triangles: Vec<IndexedTriangle>,
    pub(crate) epsilon: f64,
    face_count: usize,
    skipped_degenerate: usize,
}

impl SpatialIndex {
    /// Build an index over a mesh snapshot.
    ///
    /// Degenerate (zero-area) triangles are left out; they can never be hit.
    ///
    /// # Errors
    ///
    /// - [`BuildError::InvalidMesh`] if the snapshot has no faces, a face
    ///   with fewer than three vertices, or an out-of-range vertex index.
    /// - [`BuildError::AllFacesDegenerate`] if no face has any area.
    pub fn build(mesh: &MeshSnapshot, params: &IndexParams) -> BuildResult<Self> {
        mesh.validate()?;

        let total = mesh.triangles().count();
        let triangles: Vec<IndexedTriangle> = mesh
            .triangles()
            .filter(|(_, tri)| !tri.is_degenerate(params.degenerate_tolerance))
            .map(|(face, triangle)| IndexedTriangle { face, triangle })
            .collect();
        let skipped_degenerate = total - triangles.len();

        if triangles.is_empty() {
            return Err(BuildError::AllFacesDegenerate {
                face_count: mesh.face_count(),
            });
        }
        if skipped_degenerate > 0 {
            warn!(
                skipped = skipped_degenerate,
                "Degenerate triangles left out of spatial index"
            );
        }

        let boxes: Vec<Aabb> = triangles
            .iter()
            .map(|t| Aabb::from_triangle(&t.triangle))
            .collect();
        #[allow(clippy::cast_possible_truncation)]
        let slots: Vec<u32> = (0..triangles.len() as u32).collect();
        let max_leaf = params.max_leaf_size.max(1);

        let root = match params.parallel_threshold {
            Some(threshold) if triangles.len() >= threshold => {
                build_recursive_parallel(&boxes, slots, max_leaf, threshold.max(1))
            }
            _ => build_recursive(&boxes, slots, max_leaf),
        };

        let index = Self {
            root,
            triangles,
            epsilon: params.epsilon,
            face_count: mesh.face_count(),
            skipped_degenerate,
        };

        let stats = index.stats();
        info!(
            faces = index.face_count,
            triangles = index.triangles.len(),
            leaves = stats.leaf_count,
            depth = stats.max_depth,
            "Built spatial index"
        );

        Ok(index)
    }

    /// Number of faces in the source snapshot.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// Number of indexed (non-degenerate) triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of degenerate triangles left out during the build.
    #[must_use]
    pub fn skipped_degenerate(&self) -> usize {
        self.skipped_degenerate
    }

    /// Bounding box of all indexed geometry.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        self.root.bbox()
    }

    /// Face ids referenced by each leaf, in traversal order.
    ///
    /// Each inner list is sorted and deduplicated. Two builds of the same
    /// snapshot produce the same set of lists.
    #[must_use]
    pub fn leaf_faces(&self) -> Vec<Vec<u32>> {
        let mut out = Vec::new();
        self.collect_leaf_faces(&self.root, &mut out);
        out
    }

    fn collect_leaf_faces(&self, node: &BvhNode, out: &mut Vec<Vec<u32>>) {
        match node {
            BvhNode::Leaf { triangles, .. } => {
                let mut faces: Vec<u32> = triangles
                    .iter()
                    .map(|&slot| self.triangles[slot as usize].face)
                    .collect();
                faces.sort_unstable();
                faces.dedup();
                out.push(faces);
            }
            BvhNode::Internal { left, right, .. } => {
                self.collect_leaf_faces(left, out);
                self.collect_leaf_faces(right, out);
            }
        }
    }

    /// Get statistics about the tree structure.
    #[must_use]
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        collect_stats(&self.root, 0, &mut stats);
        stats
    }
}

/// Statistics about BVH structure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BvhStats {
    /// Number of internal (branch) nodes.
    pub internal_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Maximum number of triangles in any leaf.
    pub max_leaf_size: usize,
    /// Total triangles stored across all leaves.
    pub total_triangles_in_leaves: usize,
}

fn collect_stats(node: &BvhNode, depth: usize, stats: &mut BvhStats) {
    stats.max_depth = stats.max_depth.max(depth);
    match node {
        BvhNode::Leaf { triangles, .. } => {
            stats.leaf_count += 1;
            stats.total_triangles_in_leaves += triangles.len();
            stats.max_leaf_size = stats.max_leaf_size.max(triangles.len());
        }
        BvhNode::Internal { left, right, .. } => {
            stats.internal_count += 1;
            collect_stats(left, depth + 1, stats);
            collect_stats(right, depth + 1, stats);
        }
    }
}

/// How a node's triangles are partitioned.
enum Partition {
    Leaf(Vec<u32>),
    Split(Vec<u32>, Vec<u32>),
}

/// Bounding box of the given slots plus their median split along the longest
/// axis, unless they fit in one leaf.
fn split(boxes: &[Aabb], mut slots: Vec<u32>, max_leaf_size: usize) -> (Aabb, Partition) {
    let bbox = slots
        .iter()
        .fold(Aabb::empty(), |acc, &s| acc.union(&boxes[s as usize]));

    if slots.len() <= max_leaf_size {
        return (bbox, Partition::Leaf(slots));
    }

    // Ties fall back to slot order so the split never depends on sort stability.
    let axis = bbox.longest_axis();
    slots.sort_by(|&a, &b| {
        let ca = boxes[a as usize].center()[axis];
        let cb = boxes[b as usize].center()[axis];
        ca.partial_cmp(&cb)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let right = slots.split_off(slots.len() / 2);
    (bbox, Partition::Split(slots, right))
}

fn build_recursive(boxes: &[Aabb], slots: Vec<u32>, max_leaf_size: usize) -> BvhNode {
    match split(boxes, slots, max_leaf_size) {
        (bbox, Partition::Leaf(leaf)) => BvhNode::Leaf {
            bbox,
            triangles: leaf.into_iter().collect(),
        },
        (bbox, Partition::Split(left, right)) => BvhNode::Internal {
            bbox,
            left: Box::new(build_recursive(boxes, left, max_leaf_size)),
            right: Box::new(build_recursive(boxes, right, max_leaf_size)),
        },
    }
}

fn build_recursive_parallel(
    boxes: &[Aabb],
    slots: Vec<u32>,
    max_leaf_size: usize,
    parallel_threshold: usize,
) -> BvhNode {
    match split(boxes, slots, max_leaf_size) {
        (bbox, Partition::Leaf(leaf)) => BvhNode::Leaf {
            bbox,
            triangles: leaf.into_iter().collect(),
        },
        (bbox, Partition::Split(left, right)) => {
            let (left, right) = if left.len() >= parallel_threshold {
                rayon::join(
                    || build_recursive_parallel(boxes, left, max_leaf_size, parallel_threshold),
                    || build_recursive_parallel(boxes, right, max_leaf_size, parallel_threshold),
                )
            } else {
                (
                    build_recursive(boxes, left, max_leaf_size),
                    build_recursive(boxes, right, max_leaf_size),
                )
            };
            BvhNode::Internal {
                bbox,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use decal_types::{quad_cube, unit_cube, Face, MeshError, Point3};

    fn grid_mesh(n: u32) -> MeshSnapshot {
        let mut vertices = Vec::new();
        for y in 0..=n {
            for x in 0..=n {
                vertices.push(Point3::new(f64::from(x), f64::from(y), 0.0));
            }
        }
        let row = n + 1;
        let mut faces = Vec::new();
        for y in 0..n {
            for x in 0..n {
                let i = y * row + x;
                faces.push(Face::triangle(i, i + 1, i + row + 1));
                faces.push(Face::triangle(i, i + row + 1, i + row));
            }
        }
        MeshSnapshot::from_parts(vertices, faces)
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = SpatialIndex::build(&MeshSnapshot::new(), &IndexParams::default()).unwrap_err();
        assert_eq!(err, BuildError::InvalidMesh(MeshError::NoFaces));
    }

    #[test]
    fn all_degenerate_is_rejected() {
        let mesh = MeshSnapshot::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            &[[0, 1, 2], [2, 1, 0]],
        );
        let err = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap_err();
        assert_eq!(err, BuildError::AllFacesDegenerate { face_count: 2 });
    }

    #[test]
    fn some_degenerate_are_skipped() {
        let mut mesh = unit_cube();
        mesh.vertices.push(Point3::new(3.0, 0.0, 0.0));
        mesh.faces.push(Face::triangle(0, 1, 8));
        let index = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap();
        assert_eq!(index.skipped_degenerate(), 1);
        assert_eq!(index.triangle_count(), 12);
        assert_eq!(index.face_count(), 13);
    }

    #[test]
    fn sliver_is_kept_unless_tolerance_is_loosened() {
        let mut mesh = unit_cube();
        mesh.vertices.push(Point3::new(2.0, 1e-8, 0.0));
        mesh.faces.push(Face::triangle(0, 1, 8));

        let index = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap();
        assert_eq!(index.triangle_count(), 13);

        let loose = IndexParams::default().with_degenerate_tolerance(1e-12);
        let index = SpatialIndex::build(&mesh, &loose).unwrap();
        assert_eq!(index.triangle_count(), 12);
        assert_eq!(index.skipped_degenerate(), 1);
    }

    #[test]
    fn every_triangle_lands_in_exactly_one_leaf() {
        let index = SpatialIndex::build(&grid_mesh(10), &IndexParams::default()).unwrap();
        let stats = index.stats();
        assert_eq!(stats.total_triangles_in_leaves, 200);
        assert!(stats.max_leaf_size <= 4);
        assert!(stats.max_depth > 1);

        let mut faces: Vec<u32> = index.leaf_faces().into_iter().flatten().collect();
        faces.sort_unstable();
        assert_eq!(faces, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn quad_faces_map_back_to_face_ids() {
        let index = SpatialIndex::build(&quad_cube(), &IndexParams::default()).unwrap();
        assert_eq!(index.triangle_count(), 12);
        let mut faces: Vec<u32> = index.leaf_faces().into_iter().flatten().collect();
        faces.sort_unstable();
        faces.dedup();
        assert_eq!(faces, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn build_is_deterministic() {
        let mesh = grid_mesh(12);
        let a = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap();
        let b = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap();
        assert_eq!(a.leaf_faces(), b.leaf_faces());
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let mesh = grid_mesh(16);
        let seq = SpatialIndex::build(&mesh, &IndexParams::default().sequential()).unwrap();
        let par =
            SpatialIndex::build(&mesh, &IndexParams::default().with_parallel_threshold(8)).unwrap();
        assert_eq!(seq.leaf_faces(), par.leaf_faces());
        assert_eq!(seq.stats(), par.stats());
    }

    #[test]
    fn root_bounds_cover_mesh() {
        let index = SpatialIndex::build(&unit_cube(), &IndexParams::default()).unwrap();
        let b = index.bounds();
        assert_eq!(b.min, Point3::origin());
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn leaf_size_one_gives_one_triangle_per_leaf() {
        let params = IndexParams::default().with_max_leaf_size(1);
        let index = SpatialIndex::build(&unit_cube(), &params).unwrap();
        let stats = index.stats();
        assert_eq!(stats.leaf_count, 12);
        assert_eq!(stats.internal_count, 11);
    }
}
