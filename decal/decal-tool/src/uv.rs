//! UV placement adjustment for bound decals.

use nalgebra::{Rotation2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Adjustment applied to the UVs of decal faces.
///
/// Applied in order: translate, rotate about the UV origin, then scale
/// uniformly.
///
/// # Example
///
/// ```
/// use decal_tool::UvTransform;
/// use nalgebra::Vector2;
///
/// let t = UvTransform::default()
///     .with_translation(Vector2::new(0.5, 0.0))
///     .with_scale(2.0);
/// let uv = t.apply(Vector2::new(0.0, 0.25));
/// assert!((uv.x - 1.0).abs() < 1e-12);
/// assert!((uv.y - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UvTransform {
    /// Offset added to each UV.
    pub translation: Vector2<f64>,
    /// Counter-clockwise rotation in degrees.
    pub rotation_degrees: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for UvTransform {
    fn default() -> Self {
        Self {
            translation: Vector2::zeros(),
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }
}

impl UvTransform {
    /// Set the translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: Vector2<f64>) -> Self {
        self.translation = translation;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub const fn with_rotation_degrees(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Set the scale factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Whether this transform leaves UVs unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Restore the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Transform one UV coordinate.
    #[must_use]
    pub fn apply(&self, uv: Vector2<f64>) -> Vector2<f64> {
        let rotation = Rotation2::new(self.rotation_degrees.to_radians());
        (rotation * (uv + self.translation)) * self.scale
    }
}
