//! Error types for spatial index construction.

use decal_types::MeshError;
use thiserror::Error;

/// Result type for index construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while building a [`SpatialIndex`](crate::SpatialIndex).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The mesh snapshot failed validation.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// Every face has zero area, so nothing could ever be hit.
    #[error("all {face_count} faces are degenerate (zero area)")]
    AllFacesDegenerate {
        /// Number of faces in the mesh.
        face_count: usize,
    },
}
