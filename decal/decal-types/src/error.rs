//! Error types for mesh snapshot validation.

use thiserror::Error;

/// Result type for mesh snapshot operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors found while validating a [`MeshSnapshot`](crate::MeshSnapshot).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    NoFaces,

    /// A face has fewer than three vertices.
    #[error("face {face} has {vertex_count} vertices (at least 3 required)")]
    TooFewVertices {
        /// The offending face.
        face: u32,
        /// Number of vertices it references.
        vertex_count: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The offending face.
        face: u32,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The mesh has more faces than a `u32` face id can address.
    #[error("mesh has {face_count} faces, more than a u32 face id can address")]
    TooManyFaces {
        /// Total number of faces in the mesh.
        face_count: usize,
    },
}
