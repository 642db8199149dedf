use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::transform::Transform;
use crate::vec3::Vec3;

mod mesh;

pub use self::mesh::{Mesh, MeshError, Triangle};

/// Base-space geometry plus the pose it is drawn with.
///
/// The base arrays are never mutated; world-space data is recomputed from
/// them through [`Transform`] whenever it is asked for.
#[derive(Clone, Debug)]
pub struct Model {
    points: Vec<Vec3<f64>>,
    normals: Vec<Vec3<f64>>,
    colors: Vec<Vec3<f64>>,
    pub transform: Transform,
}

impl Model {
    /// `colors` holds one unit-range color per triangle.
    pub fn new(mesh: Mesh, colors: Vec<Vec3<f64>>) -> Result<Self, Error> {
        let Mesh { points, normals } = mesh;

        if points.len() % 3 != 0 {
            return Err(Error::Model(format!("{} points do not form whole triangles", points.len())));
        }
        if normals.len() != points.len() {
            return Err(Error::Model(format!("{} normals for {} points", normals.len(), points.len())));
        }
        if colors.len() != points.len() / 3 {
            return Err(Error::Model(format!("{} colors for {} triangles", colors.len(), points.len() / 3)));
        }

        Ok(Self {
            points,
            normals,
            colors,
            transform: Transform::default(),
        })
    }

    /// Same color on every triangle.
    pub fn with_color(mesh: Mesh, color: Vec3<f64>) -> Result<Self, Error> {
        let colors = vec![color; mesh.triangle_count()];
        Self::new(mesh, colors)
    }

    /// Random light-ish color per triangle, reproducible for a given seed.
    pub fn with_random_colors(mesh: Mesh, seed: u64) -> Result<Self, Error> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut channel = || (rng.gen_range(0..128) + 112) as f64 / 255.0;

        let colors = (0..mesh.triangle_count())
            .map(|_| Vec3::new(channel(), channel(), channel()))
            .collect();
        Self::new(mesh, colors)
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3<f64>] {
        &self.colors
    }

    pub fn transformed_points(&self) -> Vec<Vec3<f64>> {
        let basis = self.transform.basis();
        self.points.iter().map(|&p| self.transform.point_in(&basis, p)).collect()
    }

    /// One world-space normal per triangle.
    pub fn transformed_normals(&self) -> Vec<Vec3<f64>> {
        let basis = self.transform.basis();
        self.normals
            .iter()
            .step_by(3)
            .map(|&n| Transform::normal_in(&basis, n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap()
    }

    #[test]
    fn base_geometry_survives_transform_changes() {
        let mut model = Model::with_color(triangle(), Vec3::splat(1.0)).unwrap();
        model.transform.position = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!(Vec3::new(1.0, 0.0, 5.0), model.transformed_points()[1]);

        model.transform.position = Vec3::ZERO;
        assert_eq!(Vec3::new(1.0, 0.0, 0.0), model.transformed_points()[1]);
    }

    #[test]
    fn world_space_matches_transform() {
        let mut model = Model::with_color(triangle(), Vec3::splat(1.0)).unwrap();
        model.transform = Transform::new(0.6, -0.3, Vec3::new(1.0, 2.0, 4.0));
        let mesh = triangle();

        for (p, base) in model.transformed_points().iter().zip(&mesh.points) {
            assert_eq!(model.transform.to_world_point(*base), *p);
        }
        assert_eq!(vec![model.transform.to_world_normal(mesh.normals[0])], model.transformed_normals());
    }

    #[test]
    fn one_normal_per_triangle() {
        let model = Model::with_color(triangle(), Vec3::splat(1.0)).unwrap();
        assert_eq!(vec![Vec3::new(0.0, 0.0, 1.0)], model.transformed_normals());
    }

    #[test]
    fn random_colors_are_seeded_and_in_range() {
        let a = Model::with_random_colors(triangle(), 7).unwrap();
        let b = Model::with_random_colors(triangle(), 7).unwrap();

        assert_eq!(a.colors(), b.colors());
        for c in a.colors() {
            for v in &[c.x, c.y, c.z] {
                assert!(*v >= 112.0 / 255.0 && *v <= 239.0 / 255.0);
            }
        }
    }

    #[test]
    fn rejects_color_count_mismatch() {
        assert!(matches!(Model::new(triangle(), Vec::new()), Err(Error::Model(_))));
    }
}
