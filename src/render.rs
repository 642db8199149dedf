use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;

use crate::light::Light;
use crate::model::Model;
use crate::projection::Projection;
use crate::raster::{rasterize, DepthRange, Fill, Parallelism, ScreenTriangle};
use crate::target::RenderTarget;
use crate::vec2::Vec2;

/// Everything drawn in a frame.
pub struct Scene {
    pub model: Model,
    pub lights: Vec<Light>,
}

/// One frame's worth of state handed to [`Renderer::render`].
pub struct FrameContext<'a> {
    pub index: usize,
    pub scene: &'a Scene,
    pub target: &'a mut RenderTarget,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub fov: f64,
    pub depth_range: DepthRange,
    /// Draw interpolated depth as grayscale instead of colors.
    pub depth_view: bool,
    pub lighting: bool,
    pub ambient: f64,
    pub parallelism: Parallelism,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fov: std::f64::consts::FRAC_PI_3,
            depth_range: DepthRange { near: 1.0, far: 5.0 },
            depth_view: false,
            lighting: true,
            ambient: 0.2,
            parallelism: Parallelism::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RenderStats {
    pub triangles: usize,
    /// Triangles with a vertex at or behind the camera plane.
    pub behind_camera: usize,
    pub pixels_written: usize,
    pub elapsed: Duration,
}

pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    #[inline]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn fill<'a>(&self, lights: &'a [Light]) -> Fill<'a> {
        if self.settings.depth_view {
            Fill::Depth(self.settings.depth_range)
        } else if self.settings.lighting {
            Fill::Lit {
                lights,
                ambient: self.settings.ambient,
            }
        } else {
            Fill::Flat
        }
    }

    /// Projects the model's current pose. Triangles reaching to or behind
    /// the camera are dropped since the projection cannot represent them.
    pub fn project(&self, model: &Model, screen_size: Vec2<f64>) -> (Vec<ScreenTriangle>, usize) {
        let projection = Projection::new(self.settings.fov);
        let points = model.transformed_points();
        let normals = model.transformed_normals();

        let projected: Vec<Option<ScreenTriangle>> = points
            .par_chunks(3)
            .zip(normals.par_iter())
            .zip(model.colors().par_iter())
            .map(|((p, &normal), &color)| {
                if p.iter().any(|v| v.z <= 0.0) {
                    return None;
                }

                Some(ScreenTriangle {
                    a: projection.project(p[0], screen_size),
                    b: projection.project(p[1], screen_size),
                    c: projection.project(p[2], screen_size),
                    normal,
                    color,
                })
            })
            .collect();

        let behind = projected.iter().filter(|t| t.is_none()).count();
        (projected.into_iter().flatten().collect(), behind)
    }

    /// Clears the frame's target and draws the scene into it.
    pub fn render(&self, frame: &mut FrameContext) -> RenderStats {
        let now = Instant::now();
        frame.target.clear();

        let scene = frame.scene;
        let (triangles, behind_camera) = self.project(&scene.model, frame.target.size());
        if behind_camera > 0 {
            debug!("frame {}: skipped {} triangles behind the camera", frame.index, behind_camera);
        }

        let fill = self.fill(&scene.lights);
        let pixels_written = rasterize(frame.target, &triangles, &fill, self.settings.parallelism);

        RenderStats {
            triangles: scene.model.triangle_count(),
            behind_camera,
            pixels_written,
            elapsed: now.elapsed(),
        }
    }
}
