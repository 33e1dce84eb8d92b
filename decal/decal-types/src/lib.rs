//! Core geometry types for decal selection.
//!
//! This crate provides the foundational types shared by the decal selection
//! engine:
//!
//! - [`MeshSnapshot`] - An immutable vertex/face snapshot taken when a tool session starts
//! - [`Face`] - A polygon face (three or more vertex indices)
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box with a ray slab test
//! - [`Ray`] - An origin and direction derived from the current view
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero host dependencies**. It knows nothing
//! about viewports, windowing, or materials, so it can be used from:
//! - Editor plugins
//! - CLI tools
//! - Web applications (WASM)
//! - Headless tests
//!
//! # Faces and Triangles
//!
//! Faces are polygons, not just triangles. A quad-dominant mesh keeps one face
//! id per quad; intersection code works on the fan triangulation of each face
//! and reports hits by the polygon's face id.
//!
//! # Example
//!
//! ```
//! use decal_types::{MeshSnapshot, Face, Point3};
//!
//! let mesh = MeshSnapshot::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![Face::new([0, 1, 2, 3])],
//! );
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.face_triangles(0).count(), 2);
//! assert!(mesh.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod face;
mod mesh;
mod ray;
mod triangle;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use face::Face;
pub use mesh::{quad_cube, unit_cube, MeshSnapshot};
pub use ray::Ray;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
