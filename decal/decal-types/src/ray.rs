//! Rays cast from the view into the scene.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ray defined by an origin point and a direction vector.
///
/// The direction does not need to be normalized, but must be non-zero to hit
/// anything.
///
/// # Example
///
/// ```
/// use decal_types::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::origin(), Vector3::new(2.0, 0.0, 0.0));
///
/// let unit = ray.normalized();
/// let p = unit.point_at(3.0);
/// assert!((p.x - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    /// The origin of the ray.
    pub origin: Point3<f64>,
    /// The direction of the ray (not necessarily normalized).
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point `origin + t * direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Returns a copy with unit-length direction.
    ///
    /// If the direction is zero, returns the ray unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.direction.norm();
        if norm < f64::EPSILON {
            return *self;
        }
        Self {
            origin: self.origin,
            direction: self.direction / norm,
        }
    }

    /// Whether the direction is usable for casting.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.direction.norm_squared() > f64::EPSILON * f64::EPSILON
            && self.origin.coords.iter().all(|c| c.is_finite())
            && self.direction.iter().all(|c| c.is_finite())
    }

    /// Per-axis reciprocal of the direction, for slab tests.
    ///
    /// Zero components map to signed infinity.
    #[must_use]
    pub fn inverse_direction(&self) -> Vector3<f64> {
        self.direction.map(f64::recip)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Point3::origin(), -Vector3::z())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_direction_is_invalid() {
        let ray = Ray::new(Point3::origin(), Vector3::zeros());
        assert!(!ray.is_valid());
        assert_eq!(ray.normalized(), ray);
    }

    #[test]
    fn non_finite_is_invalid() {
        let ray = Ray::new(Point3::new(f64::NAN, 0.0, 0.0), Vector3::x());
        assert!(!ray.is_valid());
    }

    #[test]
    fn default_looks_down_negative_z() {
        let ray = Ray::default();
        assert!(ray.is_valid());
        assert!((ray.direction.z + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn inverse_direction_handles_zero_axes() {
        let ray = Ray::new(Point3::origin(), Vector3::new(2.0, 0.0, -4.0));
        let inv = ray.inverse_direction();
        assert!((inv.x - 0.5).abs() < f64::EPSILON);
        assert!(inv.y.is_infinite());
        assert!((inv.z + 0.25).abs() < f64::EPSILON);
    }
}
