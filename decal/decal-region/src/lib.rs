//! Face adjacency and ring-based region selection.
//!
//! This crate turns a single picked face into a contiguous region:
//!
//! - [`FaceAdjacency`] - Which faces share an edge, built once per session
//! - [`RegionSelector`] - Anchor face plus breadth-first rings around it
//! - [`FaceSelection`] - The resulting set of face ids
//!
//! # Grow and Shrink
//!
//! Each grow adds exactly one ring: every unselected face sharing an edge
//! with the selection. Rings are recorded, so a shrink removes the most
//! recent ring and `n` grows followed by one shrink equal `n - 1` grows.
//! Growing a saturated selection and shrinking back to the anchor are
//! reported as outcomes, not errors.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero host dependencies**.
//!
//! # Example
//!
//! ```
//! use decal_region::{AdjacencyParams, FaceAdjacency, RegionSelector};
//! use decal_types::quad_cube;
//!
//! let adjacency = FaceAdjacency::build(&quad_cube(), &AdjacencyParams::default()).unwrap();
//! let mut selector = RegionSelector::new(adjacency);
//!
//! // Top quad, then the four sides around it
//! selector.select_face(1).unwrap();
//! selector.grow();
//! assert_eq!(selector.selection().len(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod error;
mod selection;
mod selector;

pub use adjacency::{AdjacencyParams, FaceAdjacency};
pub use error::{AdjacencyError, AdjacencyResult, RegionError, RegionResult};
pub use selection::FaceSelection;
pub use selector::{GrowOutcome, RegionSelector, ShrinkOutcome};
