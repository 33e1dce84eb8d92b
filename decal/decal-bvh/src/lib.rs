//! Spatial index and nearest-hit ray casting for decal selection.
//!
//! [`SpatialIndex`] is a bounding volume hierarchy over the fan triangles of
//! a [`MeshSnapshot`](decal_types::MeshSnapshot). It is built once when a
//! selection session starts and answers "which face does this ray hit first"
//! every time the view changes.
//!
//! # Algorithm
//!
//! Construction median-splits triangle centroids along the longest axis of
//! each node's bounds until leaves hold at most
//! [`IndexParams::max_leaf_size`] triangles. Large subtrees are built in
//! parallel with rayon.
//!
//! Casting walks the tree nearest-child-first, prunes boxes the ray misses or
//! enters beyond the best hit so far, and runs the Möller–Trumbore test on
//! leaf triangles. Equal-distance hits (within [`TIE_TOLERANCE`]) resolve to
//! the lower face id, so results never depend on tree shape.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero host dependencies**.
//!
//! # Example
//!
//! ```
//! use decal_bvh::{IndexParams, SpatialIndex};
//! use decal_types::{unit_cube, Point3, Ray, Vector3};
//!
//! let index = SpatialIndex::build(&unit_cube(), &IndexParams::default()).unwrap();
//!
//! let ray = Ray::new(Point3::new(0.5, -3.0, 0.25), Vector3::y());
//! let hit = index.cast(&ray, 9999.9);
//!
//! // Front side of the cube (faces 4 and 5)
//! assert!(matches!(hit.face(), Some(4 | 5)));
//! assert!((hit.hit().unwrap().distance - 3.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod error;
mod params;
mod raycast;

pub use bvh::{BvhStats, SpatialIndex};
pub use error::{BuildError, BuildResult};
pub use params::IndexParams;
pub use raycast::{ray_triangle_intersect, CastResult, RayHit, TriangleHit, TIE_TOLERANCE};
