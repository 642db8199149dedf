//! Animation loop: poses the model for every frame, renders it and writes
//! the resulting images.

use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::output;
use crate::render::{FrameContext, Renderer};
use crate::target::RenderTarget;

/// Renders every frame described by `config`. Returns the color images
/// written, in frame order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, Error> {
    let mut scene = config.build_scene()?;
    info!(
        "loaded {} triangles from {}, {} light(s)",
        scene.model.triangle_count(),
        config.model.path.display(),
        scene.lights.len()
    );

    let renderer = Renderer::new(config.render_settings());
    let mut target = RenderTarget::new(config.width, config.height);
    fs::create_dir_all(&config.output.dir)?;

    let mut written = Vec::with_capacity(config.frames);
    for index in 0..config.frames {
        scene.model.transform.yaw = config.yaw.angle(index, config.frames);
        scene.model.transform.pitch = config.pitch.angle(index, config.frames);

        let stats = renderer.render(&mut FrameContext {
            index,
            scene: &scene,
            target: &mut target,
        });
        debug!("frame {}: {:?}", index, stats);
        if stats.pixels_written == 0 {
            warn!("frame {}: nothing visible", index);
        }

        let path = config.output.frame_path(index, "");
        output::save(&path, target.colors(), target.width(), target.height(), config.output.format)?;

        if config.output.normals {
            let normals = output::normals_to_colors(target.normals());
            let normals_path = config.output.frame_path(index, "_normals");
            output::save(&normals_path, &normals, target.width(), target.height(), config.output.format)?;
        }

        info!(
            "frame {} written to {}, elapsed: {:.3} ms",
            index,
            path.display(),
            stats.elapsed.as_secs_f64() * 1000.0
        );
        written.push(path);
    }

    Ok(written)
}
