//! Mesh snapshot taken at the start of a selection session.

use crate::{Aabb, Face, MeshError, MeshResult, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable snapshot of mesh geometry.
///
/// The host copies its mesh into a snapshot when a selection session starts;
/// the session owns it exclusively and drops it when the session ends. Face
/// ids used throughout the engine are indices into [`MeshSnapshot::faces`].
///
/// # Example
///
/// ```
/// use decal_types::{MeshSnapshot, Point3};
///
/// let mesh = MeshSnapshot::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     &[[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshSnapshot {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Polygon faces as indices into the vertex array.
    pub faces: Vec<Face>,
}

impl MeshSnapshot {
    /// Create a new empty snapshot.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a snapshot from vertices and polygon faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Create a snapshot from vertices and triangle index triples.
    #[must_use]
    pub fn from_triangles(vertices: Vec<Point3<f64>>, triangles: &[[u32; 3]]) -> Self {
        Self {
            vertices,
            faces: triangles.iter().copied().map(Face::from).collect(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the snapshot has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Get a face by id.
    #[inline]
    #[must_use]
    pub fn face(&self, face: u32) -> Option<&Face> {
        self.faces.get(face as usize)
    }

    /// Check that every face has at least three vertices and references only
    /// existing vertices.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in face order.
    pub fn validate(&self) -> MeshResult<()> {
        if self.faces.is_empty() {
            return Err(MeshError::NoFaces);
        }
        if u32::try_from(self.faces.len()).is_err() {
            return Err(MeshError::TooManyFaces {
                face_count: self.faces.len(),
            });
        }

        let vertex_count = self.vertices.len();
        for (face_id, face) in (0u32..).zip(&self.faces) {
            if face.len() < 3 {
                return Err(MeshError::TooFewVertices {
                    face: face_id,
                    vertex_count: face.len(),
                });
            }
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(MeshError::InvalidVertexIndex {
                    face: face_id,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Fan triangles of one face with resolved positions.
    ///
    /// Triangles referencing missing vertices are skipped; an unknown face id
    /// yields nothing.
    pub fn face_triangles(&self, face: u32) -> impl Iterator<Item = Triangle> + '_ {
        self.face(face)
            .into_iter()
            .flat_map(Face::fan)
            .filter_map(|[a, b, c]| self.resolve(a, b, c))
    }

    /// Every fan triangle in the mesh, tagged with its owning face id.
    pub fn triangles(&self) -> impl Iterator<Item = (u32, Triangle)> + '_ {
        (0u32..).zip(&self.faces).flat_map(move |(face_id, face)| {
            face.fan()
                .filter_map(move |[a, b, c]| self.resolve(a, b, c).map(|tri| (face_id, tri)))
        })
    }

    /// Average of a face's vertex positions.
    #[must_use]
    pub fn face_centroid(&self, face: u32) -> Option<Point3<f64>> {
        let face = self.face(face)?;
        if face.is_empty() {
            return None;
        }
        let mut sum = nalgebra::Vector3::zeros();
        for &i in face.indices() {
            sum += self.vertices.get(i as usize)?.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = face.len() as f64;
        Some(Point3::from(sum / n))
    }

    /// Bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    fn resolve(&self, a: u32, b: u32, c: u32) -> Option<Triangle> {
        Some(Triangle::new(
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ))
    }
}

fn cube_vertices() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ]
}

/// A unit cube from (0,0,0) to (1,1,1) as 12 triangles, two per side, with
/// outward-facing CCW winding.
///
/// Faces come in side pairs: bottom (0, 1), top (2, 3), front (4, 5),
/// back (6, 7), left (8, 9), right (10, 11).
///
/// # Example
///
/// ```
/// use decal_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> MeshSnapshot {
    MeshSnapshot::from_triangles(
        cube_vertices(),
        &[
            // Bottom (z=0), normal -Z
            [0, 2, 1],
            [0, 3, 2],
            // Top (z=1), normal +Z
            [4, 5, 6],
            [4, 6, 7],
            // Front (y=0), normal -Y
            [0, 1, 5],
            [0, 5, 4],
            // Back (y=1), normal +Y
            [3, 7, 6],
            [3, 6, 2],
            // Left (x=0), normal -X
            [0, 4, 7],
            [0, 7, 3],
            // Right (x=1), normal +X
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}

/// The same unit cube as [`unit_cube`], with one quad face per side.
///
/// Sides are ordered bottom, top, front, back, left, right.
#[must_use]
pub fn quad_cube() -> MeshSnapshot {
    MeshSnapshot::from_parts(
        cube_vertices(),
        vec![
            Face::new([0, 3, 2, 1]),
            Face::new([4, 5, 6, 7]),
            Face::new([0, 1, 5, 4]),
            Face::new([3, 7, 6, 2]),
            Face::new([0, 4, 7, 3]),
            Face::new([1, 2, 6, 5]),
        ],
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_validates() {
        assert!(unit_cube().validate().is_ok());
        assert!(quad_cube().validate().is_ok());
    }

    #[test]
    fn empty_mesh_fails_validation() {
        assert_eq!(MeshSnapshot::new().validate(), Err(MeshError::NoFaces));
    }

    #[test]
    fn short_face_fails_validation() {
        let mut mesh = unit_cube();
        mesh.faces.push(Face::new([0, 1]));
        assert_eq!(
            mesh.validate(),
            Err(MeshError::TooFewVertices {
                face: 12,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn out_of_range_vertex_fails_validation() {
        let mut mesh = unit_cube();
        mesh.faces[3] = Face::triangle(0, 1, 99);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::InvalidVertexIndex {
                face: 3,
                index: 99,
                vertex_count: 8
            })
        );
    }

    #[test]
    fn quad_cube_triangulates_to_twelve() {
        let cube = quad_cube();
        assert_eq!(cube.triangles().count(), 12);
        let owners: Vec<u32> = cube.triangles().map(|(f, _)| f).collect();
        assert_eq!(owners, vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn surface_area_of_cube() {
        let area: f64 = unit_cube().triangles().map(|(_, t)| t.area()).sum();
        assert_relative_eq!(area, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn face_centroid_of_quad() {
        let c = quad_cube().face_centroid(1).unwrap();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert_relative_eq!(c.z, 1.0);
    }

    #[test]
    fn unknown_face_has_no_triangles() {
        assert_eq!(unit_cube().face_triangles(500).count(), 0);
        assert!(unit_cube().face_centroid(500).is_none());
    }

    #[test]
    fn bounds_of_cube() {
        let b = unit_cube().bounds();
        assert_eq!(b.min, Point3::origin());
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
    }
}
