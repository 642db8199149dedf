//! Perspective projection from camera space to pixel coordinates.
//!
//! The camera sits at the origin looking down +z. Points with `z <= 0`
//! (at or behind the camera) are not clipped: the division below yields
//! non-finite or mirrored coordinates for them, and callers that care
//! must filter such points out first.

use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// Maps a camera-space point to `(screen x, screen y, camera z)`.
///
/// `fov` is the vertical field of view in radians. The returned z is the
/// untouched camera-space depth, kept for interpolation only.
#[inline]
pub fn project_to_screen(point: Vec3<f64>, screen_size: Vec2<f64>, fov: f64) -> Vec3<f64> {
    let world_height = (fov / 2.0).tan() * 2.0;
    let pixels_per_unit = screen_size.y / world_height / point.z;

    let offset = point.to_vec2() * pixels_per_unit;
    let screen = screen_size / 2.0 + offset;

    Vec3::new(screen.x, screen.y, point.z)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub fov: f64,
}

impl Projection {
    pub fn new(fov: f64) -> Self {
        Self { fov }
    }

    #[inline]
    pub fn project(&self, point: Vec3<f64>, screen_size: Vec2<f64>) -> Vec3<f64> {
        project_to_screen(point, screen_size, self.fov)
    }

    /// Inverse of [`project`](Self::project) for a known depth.
    pub fn unproject(&self, screen: Vec2<f64>, depth: f64, screen_size: Vec2<f64>) -> Vec3<f64> {
        let world_height = (self.fov / 2.0).tan() * 2.0;
        let pixels_per_unit = screen_size.y / world_height / depth;

        let p = (screen - screen_size / 2.0) / pixels_per_unit;
        Vec3::new(p.x, p.y, depth)
    }
}
