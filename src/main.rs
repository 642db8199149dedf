use std::env;
use std::error::Error;
use std::time::Instant;

use log::info;

use prism::{driver, Config, Parallelism};

const USAGE: &str = "Usage: prism [scene.json] [--depth] [--sequential] [--frames N]";

struct CliOptions {
    path: String,
    depth: bool,
    sequential: bool,
    frames: Option<usize>,
}

impl CliOptions {
    fn parse() -> Result<Self, String> {
        let mut options = CliOptions {
            path: String::from("scene.json"),
            depth: false,
            sequential: false,
            frames: None,
        };
        let mut path = None;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--depth" => options.depth = true,
                "--sequential" => options.sequential = true,
                "--frames" => {
                    let value = args.next().ok_or_else(|| format!("--frames needs a value\n{}", USAGE))?;
                    let frames = value
                        .parse()
                        .map_err(|_| format!("invalid frame count {:?}\n{}", value, USAGE))?;
                    options.frames = Some(frames);
                }
                other if other.starts_with("--") || path.is_some() => {
                    return Err(format!("unknown argument {:?}\n{}", other, USAGE));
                }
                other => path = Some(other.to_owned()),
            }
        }

        if let Some(path) = path {
            options.path = path;
        }
        Ok(options)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let options = CliOptions::parse()?;
    let mut config = Config::load(&options.path)?;
    if options.depth {
        config.depth_view = true;
    }
    if options.sequential {
        config.parallelism = Parallelism::Sequential;
    }
    if let Some(frames) = options.frames {
        config.frames = frames;
        config.validate()?;
    }

    let now = Instant::now();
    let written = driver::run(&config)?;
    info!("rendered {} frame(s) in {:.3} s", written.len(), now.elapsed().as_secs_f64());

    Ok(())
}
