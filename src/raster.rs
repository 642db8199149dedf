//! Triangle rasterization into a [`RenderTarget`].
//!
//! Every triangle is bounded by a pixel-aligned box, each pixel of the box
//! is classified with signed sub-triangle areas, and claimed pixels go
//! through a strict less-than depth test.

use rayon::prelude::*;

use crate::light::Light;
use crate::shading::shade;
use crate::target::{Band, RenderTarget};
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// Twice-halved 2D cross product: negative when `a`, `b`, `c` wind the way
/// the inside test expects.
#[inline]
pub fn signed_triangle_area(a: Vec2<f64>, b: Vec2<f64>, c: Vec2<f64>) -> f64 {
    let ac = c - a;
    let ab_perp = (b - a).perpendicular();
    ac.dot(&ab_perp) / 2.0
}

/// Barycentric weights of `p` if it lies inside (or on an edge of) the
/// triangle, `None` otherwise.
///
/// Weight `i` belongs to vertex `i` and is proportional to the area of the
/// sub-triangle opposite it. A zero-area triangle contains nothing.
pub fn point_in_triangle(a: Vec2<f64>, b: Vec2<f64>, c: Vec2<f64>, p: Vec2<f64>) -> Option<Vec3<f64>> {
    let area_abp = signed_triangle_area(a, b, p);
    let area_bcp = signed_triangle_area(b, c, p);
    let area_cap = signed_triangle_area(c, a, p);

    let inside = area_abp <= 0.0 && area_bcp <= 0.0 && area_cap <= 0.0;
    let total = (area_abp + area_bcp + area_cap).abs();

    if !inside || total <= 0.0 {
        return None;
    }

    Some(Vec3::new(area_bcp.abs(), area_cap.abs(), area_abp.abs()) / total)
}

/// Inclusive pixel range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

/// A triangle after projection: x, y in pixels, z camera depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub a: Vec3<f64>,
    pub b: Vec3<f64>,
    pub c: Vec3<f64>,
    pub normal: Vec3<f64>,
    pub color: Vec3<f64>,
}

impl ScreenTriangle {
    /// Pixel box clipped to a `width` x `height` target; `None` when the
    /// triangle misses the target entirely.
    pub fn bounds(&self, width: usize, height: usize) -> Option<BoundingBox> {
        let xs = [self.a.x, self.b.x, self.c.x];
        let ys = [self.a.y, self.b.y, self.c.y];

        if width == 0 || height == 0 || xs.iter().chain(&ys).any(|v| !v.is_finite()) {
            return None;
        }

        let (min_x, max_x) = clip_span(&xs, width)?;
        let (min_y, max_y) = clip_span(&ys, height)?;

        Some(BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Interpolated depth and weights at `p`, if the pixel is covered.
    #[inline]
    pub fn sample(&self, p: Vec2<f64>) -> Option<(f64, Vec3<f64>)> {
        let weights = point_in_triangle(self.a.to_vec2(), self.b.to_vec2(), self.c.to_vec2(), p)?;
        let depths = Vec3::new(self.a.z, self.b.z, self.c.z);

        Some((depths.dot(&weights), weights))
    }
}

fn clip_span(values: &[f64; 3], len: usize) -> Option<(usize, usize)> {
    let min = values[0].min(values[1]).min(values[2]).floor().max(0.0);
    let max = values[0].max(values[1]).max(values[2]).ceil().min((len - 1) as f64);

    if min > max {
        return None;
    }

    Some((min as usize, max as usize))
}

/// Depth range mapped to black..white in depth view.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct DepthRange {
    pub near: f64,
    pub far: f64,
}

impl DepthRange {
    #[inline]
    pub fn gray(&self, depth: f64) -> Vec3<f64> {
        Vec3::splat(((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0))
    }
}

/// How claimed pixels are colored.
#[derive(Copy, Clone, Debug)]
pub enum Fill<'a> {
    /// Triangle color as is.
    Flat,
    /// Triangle color lit by directional lights.
    Lit { lights: &'a [Light], ambient: f64 },
    /// Grayscale of the interpolated depth.
    Depth(DepthRange),
}

/// Writes one triangle into `band`, restricted to the band's rows.
/// Returns the number of pixels claimed.
pub fn rasterize_triangle(band: &mut Band, triangle: &ScreenTriangle, fill: &Fill) -> usize {
    let rows = band.rows();
    let bounds = match triangle.bounds(band.width(), rows.end) {
        Some(bounds) if bounds.max_y >= rows.start => bounds,
        _ => return 0,
    };

    let surface = match *fill {
        Fill::Flat => triangle.color,
        Fill::Lit { lights, ambient } => shade(triangle.normal, triangle.color, lights, ambient),
        Fill::Depth(_) => Vec3::ZERO,
    };

    let mut written = 0;
    for y in bounds.min_y.max(rows.start)..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let p = Vec2::new(x as f64, y as f64);
            if let Some((depth, _)) = triangle.sample(p) {
                let claimed = band.test_and_set(x, y, depth, triangle.normal, |depth| match *fill {
                    Fill::Depth(range) => range.gray(depth),
                    _ => surface,
                });
                if claimed {
                    written += 1;
                }
            }
        }
    }

    written
}

/// Work distribution of one frame.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Parallelism {
    /// One triangle after another over the whole target.
    Sequential,
    /// Disjoint bands of `rows` rows rasterized in parallel, each band
    /// drawing all triangles in submission order. Produces the same
    /// buffers as `Sequential`.
    Tiled { rows: usize },
}

impl Default for Parallelism {
    fn default() -> Self {
        Parallelism::Tiled { rows: 16 }
    }
}

/// Rasterizes `triangles` in order into `target`, returning the number of
/// pixel writes that passed the depth test.
pub fn rasterize(target: &mut RenderTarget, triangles: &[ScreenTriangle], fill: &Fill, parallelism: Parallelism) -> usize {
    match parallelism {
        Parallelism::Sequential => {
            let mut band = target.band_mut();
            triangles.iter().map(|t| rasterize_triangle(&mut band, t, fill)).sum()
        }
        Parallelism::Tiled { rows } => target
            .par_bands_mut(rows)
            .map(|mut band| triangles.iter().map(|t| rasterize_triangle(&mut band, t, fill)).sum::<usize>())
            .sum(),
    }
}
