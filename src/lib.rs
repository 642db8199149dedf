//! Software triangle rasterizer.
//!
//! Projects a posed triangle mesh through a pinhole camera, resolves
//! visibility with a depth buffer and shades pixels with directional
//! lights, all on the CPU.

#[macro_use]
extern crate serde_derive;

pub mod config;
pub mod driver;
pub mod error;
pub mod light;
pub mod matrix;
pub mod model;
pub mod output;
pub mod projection;
pub mod raster;
pub mod render;
pub mod shading;
pub mod target;
pub mod transform;
pub mod vec2;
pub mod vec3;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::light::Light;
pub use crate::model::{Mesh, MeshError, Model};
pub use crate::raster::{Fill, Parallelism, ScreenTriangle};
pub use crate::render::{FrameContext, RenderSettings, RenderStats, Renderer, Scene};
pub use crate::target::RenderTarget;
pub use crate::transform::Transform;
pub use crate::vec2::Vec2;
pub use crate::vec3::Vec3;
