use std::ops::Range;

use rayon::prelude::*;

use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// Depth of a pixel nothing has been drawn to.
pub const CLEAR_DEPTH: f64 = f64::MAX;

/// Color, depth and normal buffers of one image, stored row-major.
#[derive(Clone, Debug)]
pub struct RenderTarget {
    width: usize,
    height: usize,
    color: Vec<Vec3<f64>>,
    depth: Vec<f64>,
    normal: Vec<Vec3<f64>>,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;

        Self {
            width,
            height,
            color: vec![Vec3::ZERO; len],
            depth: vec![CLEAR_DEPTH; len],
            normal: vec![Vec3::ZERO; len],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2<f64> {
        Vec2::new(self.width as f64, self.height as f64)
    }

    /// Black color, zero normals, depth "nothing drawn".
    pub fn clear(&mut self) {
        self.color.iter_mut().for_each(|c| *c = Vec3::ZERO);
        self.depth.iter_mut().for_each(|d| *d = CLEAR_DEPTH);
        self.normal.iter_mut().for_each(|n| *n = Vec3::ZERO);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn color(&self, x: usize, y: usize) -> Option<Vec3<f64>> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn normal(&self, x: usize, y: usize) -> Option<Vec3<f64>> {
        self.index(x, y).map(|i| self.normal[i])
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3<f64>] {
        &self.color
    }

    #[inline]
    pub fn depths(&self) -> &[f64] {
        &self.depth
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3<f64>] {
        &self.normal
    }

    /// The whole target as one band.
    pub fn band_mut(&mut self) -> Band<'_> {
        Band {
            first_row: 0,
            width: self.width,
            color: &mut self.color,
            depth: &mut self.depth,
            normal: &mut self.normal,
        }
    }

    /// Splits the target into disjoint bands of `rows` rows (the last one
    /// may be shorter) that can be written from different threads. `rows`
    /// is clamped to `1..=height`.
    pub fn par_bands_mut(&mut self, rows: usize) -> impl IndexedParallelIterator<Item = Band<'_>> {
        let width = self.width;
        let rows = rows.clamp(1, self.height.max(1));
        let chunk = (rows * width).max(1);

        self.color
            .par_chunks_mut(chunk)
            .zip(self.depth.par_chunks_mut(chunk))
            .zip(self.normal.par_chunks_mut(chunk))
            .enumerate()
            .map(move |(n, ((color, depth), normal))| Band {
                first_row: n * rows,
                width,
                color,
                depth,
                normal,
            })
    }
}

/// Exclusive view of consecutive full rows of a [`RenderTarget`].
/// Coordinates passed to a band are target coordinates, not band-relative.
pub struct Band<'a> {
    first_row: usize,
    width: usize,
    color: &'a mut [Vec3<f64>],
    depth: &'a mut [f64],
    normal: &'a mut [Vec3<f64>],
}

impl<'a> Band<'a> {
    /// Target rows covered by this band.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        let height = if self.width == 0 { 0 } else { self.depth.len() / self.width };
        self.first_row..self.first_row + height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && self.rows().contains(&y));
        (y - self.first_row) * self.width + x
    }

    /// Claims pixel `(x, y)` if `depth` is strictly nearer than what is
    /// stored. All three buffers are written together or not at all.
    #[inline]
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f64, normal: Vec3<f64>, color: impl FnOnce(f64) -> Vec3<f64>) -> bool {
        let i = self.index(x, y);
        if depth < self.depth[i] {
            self.depth[i] = depth;
            self.normal[i] = normal;
            self.color[i] = color(depth);
            true
        } else {
            false
        }
    }
}
