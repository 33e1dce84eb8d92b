//! Interactive decal selection session.
//!
//! [`DecalTool`] drives one selection session over one mesh:
//!
//! 1. [`invoke`](DecalTool::invoke) snapshots the mesh and builds the spatial
//!    index and face adjacency.
//! 2. Every [`ToolEvent::ViewChanged`] casts a ray along the view axis and
//!    makes the struck face the whole selection.
//! 3. [`ToolEvent::Grow`] and [`ToolEvent::Shrink`] add or remove one ring of
//!    neighboring faces.
//! 4. [`ToolEvent::Commit`] hands the selection, the loaded image and the UV
//!    adjustment to the host's [`MaterialBinder`]; [`ToolEvent::Cancel`]
//!    abandons the session.
//!
//! Events the tool does not consume come back as
//! [`EventResponse::PassThrough`] so the host keeps its own view navigation.
//!
//! # Host Integration
//!
//! The host supplies three collaborators:
//! - [`ViewProvider`] - the current camera pose
//! - [`ImageLoader`] - resolves the decal image
//! - [`MaterialBinder`] - applies the decal on commit
//!
//! # Logging
//!
//! Session transitions are logged with `tracing` at `info`, per-event
//! selection changes at `debug`. Install a subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod collaborators;
mod config;
mod error;
mod event;
mod session;
mod state;
mod uv;
mod view;

pub use collaborators::{BindError, DecalBinding, ImageLoader, LoadError, MaterialBinder};
pub use config::DecalConfig;
pub use error::{ToolError, ToolResult};
pub use event::{EventResponse, ToolEvent, ToolStatus};
pub use session::DecalTool;
pub use state::SessionState;
pub use uv::UvTransform;
pub use view::{ray_from_view, view_forward, ViewProvider};
