//! Error types for adjacency construction and region selection.

use decal_types::MeshError;
use thiserror::Error;

/// Result type for region selection.
pub type RegionResult<T> = Result<T, RegionError>;

/// Result type for adjacency construction.
pub type AdjacencyResult<T> = Result<T, AdjacencyError>;

/// Errors that can occur during region selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegionError {
    /// A face id outside the mesh was given.
    #[error("invalid face index {face} (mesh has {face_count} faces)")]
    InvalidFace {
        /// The invalid face id.
        face: u32,
        /// Total number of faces in the mesh.
        face_count: usize,
    },
}

/// Errors that can occur while building a [`FaceAdjacency`](crate::FaceAdjacency).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AdjacencyError {
    /// The mesh snapshot failed validation.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// More non-manifold edges than the configured limit.
    #[error("mesh has {edges} non-manifold edges (limit {limit})")]
    NonManifold {
        /// Number of edges shared by more than two faces.
        edges: usize,
        /// The configured limit.
        limit: usize,
    },
}
