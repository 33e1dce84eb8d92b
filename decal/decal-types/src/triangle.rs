//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use decal_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!(!tri.is_degenerate(1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area). The test is
    /// relative to the edge lengths, so small triangles keep their normal.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        if self.is_degenerate(f64::EPSILON * f64::EPSILON) {
            return None;
        }
        let n = self.normal_unnormalized();
        Some(n / n.norm())
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Compute the centroid.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Check whether the triangle has (near) zero area.
    ///
    /// `tolerance` bounds the squared sine of the angle at `v0`:
    /// `|e1 x e2|^2 <= tolerance * |e1|^2 * |e2|^2`. The check does not
    /// depend on the triangle's scale.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let n = e1.cross(&e2);
        n.norm_squared() <= tolerance * e1.norm_squared() * e2.norm_squared()
    }

    /// Point at barycentric coordinates `(u, v)`, weighting `v1` by `u` and
    /// `v2` by `v`; `v0` receives `1 - u - v`.
    #[must_use]
    pub fn point_at_barycentric(&self, u: f64, v: f64) -> Point3<f64> {
        let w = 1.0 - u - v;
        Point3::from(self.v0.coords * w + self.v1.coords * u + self.v2.coords * v)
    }
}
