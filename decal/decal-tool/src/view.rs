//! Deriving pick rays from the host's view.

use decal_types::{Point3, Ray, Vector3};
use nalgebra::Isometry3;

/// Supplies the current camera pose.
///
/// The camera looks along its local −Z axis, with +Y up, as in most
/// viewport conventions.
pub trait ViewProvider {
    /// Transform from camera space to world space.
    fn camera_to_world(&self) -> Isometry3<f64>;
}

impl ViewProvider for Isometry3<f64> {
    fn camera_to_world(&self) -> Isometry3<f64> {
        *self
    }
}

/// World-space forward axis of a camera pose.
#[must_use]
pub fn view_forward(camera_to_world: &Isometry3<f64>) -> Vector3<f64> {
    camera_to_world.rotation * -Vector3::z()
}

/// The pick ray for a camera pose: along the view axis, starting
/// `origin_offset` in front of the camera.
///
/// # Example
///
/// ```
/// use decal_tool::ray_from_view;
/// use nalgebra::{Isometry3, Vector3};
///
/// // Camera at z = 10 looking down -Z
/// let pose = Isometry3::translation(0.0, 0.0, 10.0);
/// let ray = ray_from_view(&pose, 1.0);
///
/// assert!((ray.origin.z - 9.0).abs() < 1e-12);
/// assert!((ray.direction.z + 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ray_from_view(camera_to_world: &Isometry3<f64>, origin_offset: f64) -> Ray {
    let forward = view_forward(camera_to_world);
    let eye = Point3::from(camera_to_world.translation.vector);
    Ray::new(eye + forward * origin_offset, forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_looks_down_negative_z() {
        let ray = ray_from_view(&Isometry3::identity(), 1.0);
        assert_relative_eq!(ray.origin, Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(ray.direction, -Vector3::z());
    }

    #[test]
    fn rotation_turns_the_ray() {
        // Yaw 90 degrees about +Y: -Z maps to -X
        let pose = Isometry3::from_parts(
            Translation3::new(5.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
        );
        let ray = ray_from_view(&pose, 2.0);
        assert_relative_eq!(ray.direction, -Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(ray.origin, Point3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_offset_starts_at_eye() {
        let pose = Isometry3::translation(1.0, 2.0, 3.0);
        let ray = ray_from_view(&pose, 0.0);
        assert_relative_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
    }
}
