//! Input events and the tool's responses.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An input event delivered to an active session.
///
/// `E` is the host's own event type. Events the tool does not consume are
/// handed back unchanged in [`EventResponse::PassThrough`] so the host can
/// keep navigating the view while the tool runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ToolEvent<E> {
    /// The view moved; pick the face under the view axis.
    ViewChanged,
    /// Add one ring to the selection.
    Grow,
    /// Remove the outermost ring.
    Shrink,
    /// Bind the decal to the selection and finish.
    Commit,
    /// Abandon the session.
    Cancel,
    /// Anything else.
    Other(E),
}

/// What the tool did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResponse<E> {
    /// The tool consumed the event.
    Handled(ToolStatus),
    /// The tool ignored the event; the host should process it.
    PassThrough(E),
}

impl<E> EventResponse<E> {
    /// The status, if the event was handled.
    #[must_use]
    pub const fn status(&self) -> Option<&ToolStatus> {
        match self {
            Self::Handled(status) => Some(status),
            Self::PassThrough(_) => None,
        }
    }
}

/// Outcome of a handled event, suitable for a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ToolStatus {
    /// A new face is now the whole selection.
    FaceSelected(u32),
    /// The view axis hit nothing; the selection is unchanged.
    NoFaceHit,
    /// A ring was added.
    Expanded {
        /// Faces added.
        added: usize,
        /// Selection size afterwards.
        total: usize,
    },
    /// A ring was removed.
    Reduced {
        /// Faces removed.
        removed: usize,
        /// Selection size afterwards.
        total: usize,
    },
    /// Nothing changed.
    Unchanged,
    /// The decal was bound.
    Finished {
        /// Number of faces the decal was bound to.
        faces: usize,
    },
    /// The session was cancelled.
    Cancelled,
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceSelected(face) => write!(f, "Selected face {face}."),
            Self::NoFaceHit => f.write_str("No face hit."),
            Self::Expanded { total, .. } => write!(f, "Expanding selection ({total} faces)."),
            Self::Reduced { total, .. } => write!(f, "Reducing selection ({total} faces)."),
            Self::Unchanged => f.write_str("Selection unchanged."),
            Self::Finished { faces } => write!(f, "Operation finished ({faces} faces)."),
            Self::Cancelled => f.write_str("Operation cancelled."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages() {
        assert_eq!(ToolStatus::FaceSelected(7).to_string(), "Selected face 7.");
        assert_eq!(ToolStatus::NoFaceHit.to_string(), "No face hit.");
        assert_eq!(ToolStatus::Cancelled.to_string(), "Operation cancelled.");
    }

    #[test]
    fn pass_through_has_no_status() {
        let response: EventResponse<&str> = EventResponse::PassThrough("orbit");
        assert!(response.status().is_none());
        let response: EventResponse<&str> = EventResponse::Handled(ToolStatus::Unchanged);
        assert_eq!(response.status(), Some(&ToolStatus::Unchanged));
    }
}
