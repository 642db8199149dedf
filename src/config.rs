//! Scene file: a JSON document describing the target, camera, model,
//! lights and animation. Every field is optional.

use std::f64::consts::{FRAC_PI_3, PI, TAU};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::light::{unit_rgb, Light};
use crate::model::{Mesh, Model};
use crate::raster::{DepthRange, Parallelism};
use crate::render::{RenderSettings, Scene};
use crate::vec3::Vec3;

/// Angle over the animation: `start + turns * 2pi * frame / frames`.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Schedule {
    pub start: f64,
    pub turns: f64,
}

impl Schedule {
    pub fn angle(&self, frame: usize, frames: usize) -> f64 {
        self.start + self.turns * TAU * frame as f64 / frames.max(1) as f64
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub position: Vec3<f64>,
    /// Seed for per-triangle colors.
    pub seed: u64,
    /// Single 8-bit color for all triangles, overriding `seed`.
    pub color: Option<[u8; 3]>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/cube.obj"),
            position: Vec3::new(0.0, 0.0, 3.0),
            seed: 0,
            color: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub prefix: String,
    pub format: crate::output::ImageFormat,
    /// Also write the normal buffer of every frame.
    pub normals: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: String::from("frame"),
            format: Default::default(),
            normals: false,
        }
    }
}

impl OutputConfig {
    pub fn frame_path(&self, frame: usize, suffix: &str) -> PathBuf {
        self.dir
            .join(format!("{}{:02}{}.{}", self.prefix, frame, suffix, self.format.extension()))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view, radians.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub frames: usize,
    pub yaw: Schedule,
    pub pitch: Schedule,
    pub ambient: f64,
    pub lighting: bool,
    pub depth_view: bool,
    pub parallelism: Parallelism,
    pub model: ModelConfig,
    pub lights: Vec<Light>,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            fov: FRAC_PI_3,
            near: 1.0,
            far: 5.0,
            frames: 120,
            yaw: Schedule { start: PI, turns: 1.0 },
            pitch: Schedule::default(),
            ambient: 0.2,
            lighting: true,
            depth_view: false,
            parallelism: Parallelism::default(),
            model: ModelConfig::default(),
            lights: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Reads a scene file. Relative paths inside it are taken relative to
    /// the file's own directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut config: Config = serde_json::from_reader(BufReader::new(file))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;

        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        self.model.path = base.join(&self.model.path);
        self.output.dir = base.join(&self.output.dir);
    }

    pub fn validate(&self) -> Result<(), Error> {
        let fail = |msg: String| Err(Error::Config(msg));

        if self.width == 0 || self.height == 0 {
            return fail(format!("image size {}x{} is empty", self.width, self.height));
        }
        let bytes = self.width.checked_mul(self.height).and_then(|p| p.checked_mul(4));
        if bytes.map_or(true, |b| b > (i32::MAX as usize)) {
            return fail(format!("image size {}x{} is too large", self.width, self.height));
        }
        if self.frames == 0 {
            return fail("frame count must be positive".into());
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return fail(format!("field of view {} is outside (0, pi)", self.fov));
        }
        if !(self.far > self.near) {
            return fail(format!("far plane {} is not beyond near plane {}", self.far, self.near));
        }
        if !self.ambient.is_finite() || self.ambient < 0.0 {
            return fail(format!("ambient strength {} must be non-negative", self.ambient));
        }
        if let Parallelism::Tiled { rows: 0 } = self.parallelism {
            return fail("tiles need at least one row".into());
        }

        Ok(())
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            fov: self.fov,
            depth_range: DepthRange {
                near: self.near,
                far: self.far,
            },
            depth_view: self.depth_view,
            lighting: self.lighting,
            ambient: self.ambient,
            parallelism: self.parallelism,
        }
    }

    pub fn build_scene(&self) -> Result<Scene, Error> {
        let mesh = Mesh::load(&self.model.path)?;
        let mut model = match self.model.color {
            Some(rgb) => Model::with_color(mesh, unit_rgb(rgb))?,
            None => Model::with_random_colors(mesh, self.model.seed)?,
        };
        model.transform.position = self.model.position;

        Ok(Scene {
            model,
            lights: self.lights.clone(),
        })
    }
}
