use crate::light::Light;
use crate::vec3::Vec3;

/// Lambertian diffuse from every light plus an ambient term, clamped to
/// unit range per channel.
///
/// `base` and the light colors must both be in unit range.
pub fn shade(normal: Vec3<f64>, base: Vec3<f64>, lights: &[Light], ambient: f64) -> Vec3<f64> {
    let mut color = Vec3::ZERO;

    for light in lights {
        let diffuse = normal.dot(&light.direction()).max(0.0);
        color += base * light.color().scale(diffuse);
    }

    (color + base.scale(ambient)).clamp(0.0, 1.0)
}
