//! Geometry-aware decal selection.
//!
//! Point a camera at a mesh, pick the face under the view axis, grow or
//! shrink a contiguous region around it ring by ring, and bind an image
//! decal to the result. This umbrella crate re-exports all decal-* crates.
//! None of them depend on a particular editor or renderer; the host plugs in
//! through the traits in [`tool`].
//!
//! # Quick Start
//!
//! ```
//! use decal::prelude::*;
//! use nalgebra::Isometry3;
//!
//! struct Binder;
//! impl MaterialBinder for Binder {
//!     type Image = &'static str;
//!     fn bind(&mut self, binding: &DecalBinding<'_, &'static str>) -> Result<(), BindError> {
//!         assert_eq!(binding.faces.len(), 4);
//!         Ok(())
//!     }
//! }
//!
//! struct Loader;
//! impl ImageLoader for Loader {
//!     type Image = &'static str;
//!     fn load(&mut self, _: &std::path::Path) -> Result<&'static str, LoadError> {
//!         Ok("logo")
//!     }
//! }
//!
//! let mut tool = DecalTool::new(DecalConfig::default());
//! tool.invoke(Some(unit_cube())).unwrap();
//! tool.load_image(&mut Loader, std::path::Path::new("logo.png")).unwrap();
//!
//! let view = Isometry3::translation(0.7, 0.3, 5.0);
//! for event in [ToolEvent::<()>::ViewChanged, ToolEvent::Grow, ToolEvent::Commit] {
//!     tool.handle_event(event, &view, &mut Binder).unwrap();
//! }
//! assert_eq!(tool.state(), SessionState::Finished);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Mesh snapshots, polygon faces, triangles, bounds, rays
//! - [`bvh`] - Spatial index and nearest-hit ray casting
//! - [`region`] - Face adjacency and ring-based region selection
//! - [`tool`] - The interactive session state machine and host traits
//!
//! # Feature Flags
//!
//! - `serde` - Serialize parameters, meshes, selections and statuses

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Mesh snapshots, polygon faces, triangles, bounds, rays.
pub use decal_types as types;

/// Spatial index and nearest-hit ray casting.
pub use decal_bvh as bvh;

/// Face adjacency and ring-based region selection.
pub use decal_region as region;

/// The interactive session state machine and host traits.
pub use decal_tool as tool;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for decal selection.
///
/// # Usage
///
/// ```
/// use decal::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use decal_types::{quad_cube, unit_cube, Face, MeshSnapshot, Point3, Ray, Vector3};

    // Index and casting
    pub use decal_bvh::{CastResult, IndexParams, RayHit, SpatialIndex};

    // Selection
    pub use decal_region::{
        AdjacencyParams, FaceAdjacency, FaceSelection, GrowOutcome, RegionSelector,
        ShrinkOutcome,
    };

    // Session
    pub use decal_tool::{
        BindError, DecalBinding, DecalConfig, DecalTool, EventResponse, ImageLoader, LoadError,
        MaterialBinder, SessionState, ToolError, ToolEvent, ToolStatus, UvTransform,
        ViewProvider,
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = MeshSnapshot::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(DecalConfig::default().index, IndexParams::default());
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::unit_cube();
        let _ = bvh::IndexParams::default();
        let _ = region::AdjacencyParams::default();
        let _ = tool::UvTransform::default();
    }
}
