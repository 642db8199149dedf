use crate::matrix::Matrix3x3;
use crate::vec3::Vec3;

/// Yaw/pitch rotation followed by a translation.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transform {
    /// Rotation about the vertical (y) axis, radians.
    pub yaw: f64,
    /// Rotation about the horizontal (x) axis, radians.
    pub pitch: f64,
    pub position: Vec3<f64>,
}

impl Transform {
    pub fn new(yaw: f64, pitch: f64, position: Vec3<f64>) -> Self {
        Self {
            yaw,
            pitch,
            position,
        }
    }

    /// Orthonormal right-handed basis; columns are `ihat`, `jhat`, `khat`.
    pub fn basis(&self) -> Matrix3x3<f64> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let yaw = Matrix3x3::from_columns(
            Vec3::new(cy, 0.0, sy),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-sy, 0.0, cy),
        );
        let pitch = Matrix3x3::from_columns(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, cp, -sp),
            Vec3::new(0.0, sp, cp),
        );

        yaw * pitch
    }

    #[inline]
    pub fn to_world_point(&self, p: Vec3<f64>) -> Vec3<f64> {
        self.point_in(&self.basis(), p)
    }

    #[inline]
    pub fn to_world_normal(&self, n: Vec3<f64>) -> Vec3<f64> {
        Self::normal_in(&self.basis(), n)
    }

    /// [`to_world_point`](Self::to_world_point) with a basis computed once
    /// for many points.
    #[inline]
    pub(crate) fn point_in(&self, basis: &Matrix3x3<f64>, p: Vec3<f64>) -> Vec3<f64> {
        basis * p + self.position
    }

    #[inline]
    pub(crate) fn normal_in(basis: &Matrix3x3<f64>, n: Vec3<f64>) -> Vec3<f64> {
        (basis * n).unit()
    }
}
