//! Error types for the decal tool session.

use decal_bvh::BuildError;
use decal_region::{AdjacencyError, RegionError};
use thiserror::Error;

use crate::collaborators::{BindError, LoadError};
use crate::state::SessionState;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while running a decal tool session.
///
/// Errors raised by [`DecalTool::invoke`](crate::DecalTool::invoke) end the
/// session ([`SessionState::Cancelled`]). Errors raised while handling
/// events leave the session where it was; see [`ToolError::is_fatal`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// The session was started without a usable source mesh.
    #[error("precondition failed: {reason}")]
    Precondition {
        /// What was missing.
        reason: &'static str,
    },

    /// The spatial index could not be built.
    #[error("failed to build spatial index: {0}")]
    Build(#[from] BuildError),

    /// The face adjacency could not be built.
    #[error("failed to build face adjacency: {0}")]
    Adjacency(#[from] AdjacencyError),

    /// A selection operation was rejected.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Commit was requested with nothing selected.
    #[error("cannot commit an empty selection")]
    EmptySelection,

    /// Commit was requested before an image was loaded.
    #[error("no decal image loaded")]
    MissingImage,

    /// The operation is not valid in the current session state.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        /// State the session was in.
        state: SessionState,
        /// What was attempted.
        operation: &'static str,
    },

    /// The image loader failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The material binder rejected the commit.
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl ToolError {
    /// Whether this error ended the session.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Precondition { .. } | Self::Build(_) | Self::Adjacency(_)
        )
    }
}
