//! The interactive decal selection session.

use std::path::Path;

use decal_bvh::{CastResult, SpatialIndex};
use decal_region::{FaceAdjacency, FaceSelection, GrowOutcome, RegionSelector, ShrinkOutcome};
use decal_types::{MeshSnapshot, Ray};
use tracing::{debug, info, warn};

use crate::collaborators::{DecalBinding, ImageLoader, MaterialBinder};
use crate::config::DecalConfig;
use crate::error::{ToolError, ToolResult};
use crate::event::{EventResponse, ToolEvent, ToolStatus};
use crate::state::SessionState;
use crate::uv::UvTransform;
use crate::view::{ray_from_view, ViewProvider};

/// Structures built on invoke and dropped when the session ends.
#[derive(Debug)]
struct Workspace {
    mesh: MeshSnapshot,
    index: SpatialIndex,
    selector: RegionSelector,
}

/// One interactive decal session over one mesh.
///
/// The host invokes the tool with a mesh snapshot, feeds it events while
/// the operator moves the view and grows or shrinks the region, and
/// finally commits or cancels. `I` is the host's image handle.
///
/// # Example
///
/// ```
/// use decal_tool::{DecalConfig, DecalTool, SessionState, ToolEvent, ToolStatus, EventResponse};
/// use decal_tool::{BindError, DecalBinding, MaterialBinder};
/// use decal_types::unit_cube;
/// use nalgebra::Isometry3;
///
/// struct NoopBinder;
/// impl MaterialBinder for NoopBinder {
///     type Image = ();
///     fn bind(&mut self, _: &DecalBinding<'_, ()>) -> Result<(), BindError> {
///         Ok(())
///     }
/// }
///
/// let mut tool = DecalTool::new(DecalConfig::default());
/// tool.invoke(Some(unit_cube())).unwrap();
/// assert_eq!(tool.state(), SessionState::Active);
///
/// // Camera above the cube looking straight down
/// let view = Isometry3::translation(0.7, 0.3, 5.0);
/// let response = tool
///     .handle_event(ToolEvent::<()>::ViewChanged, &view, &mut NoopBinder)
///     .unwrap();
/// assert!(matches!(response, EventResponse::Handled(ToolStatus::FaceSelected(2))));
/// ```
#[derive(Debug)]
pub struct DecalTool<I> {
    config: DecalConfig,
    state: SessionState,
    workspace: Option<Workspace>,
    image: Option<I>,
    uv: UvTransform,
}

impl<I> DecalTool<I> {
    /// Create an idle tool.
    #[must_use]
    pub fn new(config: DecalConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            workspace: None,
            image: None,
            uv: UvTransform::default(),
        }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &DecalConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The mesh snapshot, while the session is active.
    #[must_use]
    pub fn mesh(&self) -> Option<&MeshSnapshot> {
        self.workspace.as_ref().map(|w| &w.mesh)
    }

    /// The spatial index, while the session is active.
    #[must_use]
    pub fn index(&self) -> Option<&SpatialIndex> {
        self.workspace.as_ref().map(|w| &w.index)
    }

    /// The face adjacency, while the session is active.
    #[must_use]
    pub fn adjacency(&self) -> Option<&FaceAdjacency> {
        self.workspace.as_ref().map(|w| w.selector.adjacency())
    }

    /// The current selection, while the session is active.
    #[must_use]
    pub fn selection(&self) -> Option<&FaceSelection> {
        self.workspace.as_ref().map(|w| w.selector.selection())
    }

    /// The face most recently picked from the view.
    #[must_use]
    pub fn anchor(&self) -> Option<u32> {
        self.workspace.as_ref().and_then(|w| w.selector.anchor())
    }

    /// The loaded decal image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// The UV adjustment passed to the binder on commit.
    #[must_use]
    pub fn uv_transform(&self) -> &UvTransform {
        &self.uv
    }

    /// Replace the UV adjustment.
    pub fn set_uv_transform(&mut self, uv: UvTransform) {
        self.uv = uv;
    }

    /// Start the session: snapshot the mesh and build the spatial index and
    /// face adjacency.
    ///
    /// `None` means the host had no mesh to offer (for example, the active
    /// object is not a mesh).
    ///
    /// # Errors
    ///
    /// - [`ToolError::InvalidState`] if the session was already invoked.
    /// - [`ToolError::Precondition`] if `mesh` is `None`.
    /// - [`ToolError::Build`] or [`ToolError::Adjacency`] if the mesh cannot
    ///   be indexed.
    ///
    /// Every error except `InvalidState` moves the session to
    /// [`SessionState::Cancelled`].
    pub fn invoke(&mut self, mesh: Option<MeshSnapshot>) -> ToolResult<()> {
        if self.state != SessionState::Idle {
            return Err(self.invalid_state("invoke"));
        }

        match Self::prepare(mesh, &self.config) {
            Ok(workspace) => {
                info!(
                    faces = workspace.mesh.face_count(),
                    vertices = workspace.mesh.vertex_count(),
                    "Decal session active"
                );
                self.workspace = Some(workspace);
                self.state = SessionState::Active;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Decal session failed to start");
                self.state = SessionState::Cancelled;
                Err(err)
            }
        }
    }

    fn prepare(mesh: Option<MeshSnapshot>, config: &DecalConfig) -> ToolResult<Workspace> {
        let mesh = mesh.ok_or(ToolError::Precondition {
            reason: "no source mesh",
        })?;
        let index = SpatialIndex::build(&mesh, &config.index)?;
        let adjacency = FaceAdjacency::build(&mesh, &config.adjacency)?;
        Ok(Workspace {
            mesh,
            index,
            selector: RegionSelector::new(adjacency),
        })
    }

    /// Load the decal image through the host's loader.
    ///
    /// May be called before or during the session; a later load replaces the
    /// earlier image.
    ///
    /// # Errors
    ///
    /// - [`ToolError::InvalidState`] once the session has ended.
    /// - [`ToolError::Load`] if the loader fails; any earlier image is kept.
    pub fn load_image<L>(&mut self, loader: &mut L, path: &Path) -> ToolResult<()>
    where
        L: ImageLoader<Image = I>,
    {
        if self.state.is_terminal() {
            return Err(self.invalid_state("load image"));
        }
        let image = loader.load(path)?;
        debug!(path = %path.display(), "Loaded decal image");
        self.image = Some(image);
        Ok(())
    }

    /// Handle one input event.
    ///
    /// `view` is read on [`ToolEvent::ViewChanged`]; `binder` is called on
    /// [`ToolEvent::Commit`].
    ///
    /// # Errors
    ///
    /// - [`ToolError::InvalidState`] unless the session is active.
    /// - [`ToolError::EmptySelection`], [`ToolError::MissingImage`] or
    ///   [`ToolError::Bind`] from a commit that could not complete; the
    ///   session stays active.
    pub fn handle_event<E, V, B>(
        &mut self,
        event: ToolEvent<E>,
        view: &V,
        binder: &mut B,
    ) -> ToolResult<EventResponse<E>>
    where
        V: ViewProvider + ?Sized,
        B: MaterialBinder<Image = I> + ?Sized,
    {
        if !self.state.is_active() {
            return Err(self.invalid_state("handle event"));
        }

        let status = match event {
            ToolEvent::ViewChanged => {
                let ray = ray_from_view(&view.camera_to_world(), self.config.ray_origin_offset);
                self.pick(&ray)?
            }
            ToolEvent::Grow => match self.selector_mut()?.grow() {
                GrowOutcome::Expanded { added, total } => ToolStatus::Expanded { added, total },
                GrowOutcome::Saturated => ToolStatus::Unchanged,
            },
            ToolEvent::Shrink => match self.selector_mut()?.shrink() {
                ShrinkOutcome::Reduced { removed, total } => ToolStatus::Reduced { removed, total },
                ShrinkOutcome::Unchanged => ToolStatus::Unchanged,
            },
            ToolEvent::Commit => self.commit(binder)?,
            ToolEvent::Cancel => self.cancel(),
            ToolEvent::Other(event) => return Ok(EventResponse::PassThrough(event)),
        };

        Ok(EventResponse::Handled(status))
    }

    fn invalid_state(&self, operation: &'static str) -> ToolError {
        ToolError::InvalidState {
            state: self.state,
            operation,
        }
    }

    fn selector_mut(&mut self) -> ToolResult<&mut RegionSelector> {
        let err = self.invalid_state("select");
        self.workspace
            .as_mut()
            .map(|workspace| &mut workspace.selector)
            .ok_or(err)
    }

    fn pick(&mut self, ray: &Ray) -> ToolResult<ToolStatus> {
        let max_distance = self.config.max_ray_distance;
        let err = self.invalid_state("pick");
        let workspace = self.workspace.as_mut().ok_or(err)?;

        match workspace.index.cast(ray, max_distance) {
            CastResult::Hit(hit) => {
                if workspace.selector.anchor() == Some(hit.face) {
                    return Ok(ToolStatus::Unchanged);
                }
                workspace.selector.select_face(hit.face)?;
                debug!(face = hit.face, distance = hit.distance, "Picked face");
                Ok(ToolStatus::FaceSelected(hit.face))
            }
            CastResult::Miss => {
                debug!("No face hit");
                Ok(ToolStatus::NoFaceHit)
            }
        }
    }

    fn commit<B>(&mut self, binder: &mut B) -> ToolResult<ToolStatus>
    where
        B: MaterialBinder<Image = I> + ?Sized,
    {
        let faces = self
            .workspace
            .as_ref()
            .map(|w| w.selector.selection().to_sorted_vec())
            .unwrap_or_default();
        if faces.is_empty() {
            return Err(ToolError::EmptySelection);
        }
        let Some(image) = self.image.as_ref() else {
            return Err(ToolError::MissingImage);
        };

        let binding = DecalBinding {
            faces,
            image,
            uv: self.uv,
        };
        if let Err(err) = binder.bind(&binding) {
            warn!(error = %err, faces = binding.faces.len(), "Decal binding failed");
            return Err(err.into());
        }

        let count = binding.faces.len();
        self.end(SessionState::Finished);
        info!(faces = count, "Decal session finished");
        Ok(ToolStatus::Finished { faces: count })
    }

    fn cancel(&mut self) -> ToolStatus {
        self.end(SessionState::Cancelled);
        info!("Decal session cancelled");
        ToolStatus::Cancelled
    }

    fn end(&mut self, state: SessionState) {
        self.state = state;
        self.workspace = None;
    }
}
