//! Host-side collaborators: image loading and material binding.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::uv::UvTransform;

/// Loads the image that will be bound as a decal.
///
/// How paths are chosen (file dialogs, drag and drop) is up to the host.
pub trait ImageLoader {
    /// Host handle for a loaded image.
    type Image;

    /// Load an image from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the image cannot be read or decoded.
    fn load(&mut self, path: &Path) -> Result<Self::Image, LoadError>;
}

/// Binds a decal image to selected faces, e.g. by building a material and
/// assigning it to the faces.
pub trait MaterialBinder {
    /// Host handle for a loaded image.
    type Image;

    /// Apply the decal described by `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] if the host could not apply the decal.
    fn bind(&mut self, binding: &DecalBinding<'_, Self::Image>) -> Result<(), BindError>;
}

/// Everything the host needs to apply a decal.
#[derive(Debug, Clone, PartialEq)]
pub struct DecalBinding<'a, I> {
    /// Selected face ids, ascending.
    pub faces: Vec<u32>,
    /// The decal image.
    pub image: &'a I,
    /// Placement adjustment for the decal's UVs.
    pub uv: UvTransform,
}

/// Image loading failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load image {}: {reason}", path.display())]
pub struct LoadError {
    /// Path that was requested.
    pub path: PathBuf,
    /// Why loading failed.
    pub reason: String,
}

impl LoadError {
    /// Create a load error.
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Material binding failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to bind decal material: {reason}")]
pub struct BindError {
    /// Why binding failed.
    pub reason: String,
}

impl BindError {
    /// Create a bind error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
