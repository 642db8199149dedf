use std::f64::consts::FRAC_PI_3;
use std::fs;

use prism::projection::Projection;
use prism::target::CLEAR_DEPTH;
use prism::{driver, Config, FrameContext, Light, Mesh, Model, Parallelism, RenderSettings, RenderTarget, Renderer, Scene, Vec2, Vec3};

const WIDTH: usize = 300;
const HEIGHT: usize = 150;

/// OBJ text for one triangle whose vertices project onto the given pixels
/// at the given camera depth.
fn screen_triangle_obj(pixels: [(f64, f64); 3], depth: f64, first_index: usize) -> String {
    let projection = Projection::new(FRAC_PI_3);
    let size = Vec2::new(WIDTH as f64, HEIGHT as f64);

    let mut obj = String::new();
    for (x, y) in &pixels {
        let p = projection.unproject(Vec2::new(*x, *y), depth, size);
        obj.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
    }
    obj.push_str(&format!("f {} {} {}\n", first_index, first_index + 1, first_index + 2));
    obj
}

fn flat_settings(parallelism: Parallelism) -> RenderSettings {
    RenderSettings {
        fov: FRAC_PI_3,
        lighting: false,
        parallelism,
        ..RenderSettings::default()
    }
}

fn render(scene: &Scene, settings: RenderSettings) -> RenderTarget {
    let mut target = RenderTarget::new(WIDTH, HEIGHT);
    Renderer::new(settings).render(&mut FrameContext {
        index: 0,
        scene,
        target: &mut target,
    });
    target
}

#[test]
fn unlit_triangle_keeps_its_color() {
    let obj = screen_triangle_obj([(100.0, 100.0), (200.0, 100.0), (150.0, 50.0)], 2.0, 1);
    let model = Model::with_color(Mesh::parse(&obj).unwrap(), Vec3::new(1.0, 0.0, 0.0)).unwrap();
    let scene = Scene { model, lights: Vec::new() };

    for parallelism in &[Parallelism::Sequential, Parallelism::Tiled { rows: 8 }] {
        let target = render(&scene, flat_settings(*parallelism));

        assert_eq!(Some(Vec3::new(1.0, 0.0, 0.0)), target.color(150, 83));
        assert!((target.depth(150, 83).unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(Some(Vec3::new(0.0, 0.0, -1.0)), target.normal(150, 83));

        assert_eq!(Some(Vec3::ZERO), target.color(150, 120));
        assert_eq!(Some(Vec3::ZERO), target.color(10, 10));
        assert_eq!(Some(CLEAR_DEPTH), target.depth(10, 10));
        assert_eq!(None, target.color(150, 200));
    }
}

#[test]
fn nearer_triangle_wins_regardless_of_order() {
    let pixels = [(60.0, 120.0), (240.0, 120.0), (150.0, 20.0)];
    let red = Vec3::new(1.0, 0.0, 0.0);
    let blue = Vec3::new(0.0, 0.0, 1.0);

    let orders = [
        (
            screen_triangle_obj(pixels, 1.0, 1) + &screen_triangle_obj(pixels, 2.0, 4),
            vec![red, blue],
        ),
        (
            screen_triangle_obj(pixels, 2.0, 1) + &screen_triangle_obj(pixels, 1.0, 4),
            vec![blue, red],
        ),
    ];

    for (obj, colors) in &orders {
        let model = Model::new(Mesh::parse(obj).unwrap(), colors.clone()).unwrap();
        let scene = Scene { model, lights: Vec::new() };

        for parallelism in &[Parallelism::Sequential, Parallelism::Tiled { rows: 5 }] {
            let target = render(&scene, flat_settings(*parallelism));
            assert_eq!(Some(red), target.color(150, 90));
            assert!((target.depth(150, 90).unwrap() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn lights_shade_camera_facing_triangle() {
    let obj = screen_triangle_obj([(100.0, 100.0), (200.0, 100.0), (150.0, 50.0)], 2.0, 1);
    let model = Model::with_color(Mesh::parse(&obj).unwrap(), Vec3::splat(0.5)).unwrap();
    let scene = Scene {
        model,
        lights: vec![Light::from_rgb(Vec3::new(0.0, 0.0, -3.0), [255, 255, 255])],
    };

    let settings = RenderSettings {
        fov: FRAC_PI_3,
        ambient: 0.5,
        ..RenderSettings::default()
    };
    let target = render(&scene, settings);

    let color = target.color(150, 83).unwrap();
    assert!((color - Vec3::splat(0.75)).len() < 1e-9);
}

#[test]
fn depth_view_shows_normalized_depth() {
    let obj = screen_triangle_obj([(100.0, 100.0), (200.0, 100.0), (150.0, 50.0)], 2.0, 1);
    let model = Model::with_color(Mesh::parse(&obj).unwrap(), Vec3::splat(1.0)).unwrap();
    let scene = Scene { model, lights: Vec::new() };

    let settings = RenderSettings {
        depth_view: true,
        ..flat_settings(Parallelism::default())
    };
    let target = render(&scene, settings);

    let gray = target.color(150, 83).unwrap();
    assert!((gray - Vec3::splat(0.25)).len() < 1e-9);
}

#[test]
fn driver_writes_one_image_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("models")).unwrap();
    fs::copy(concat!(env!("CARGO_MANIFEST_DIR"), "/models/cube.obj"), dir.path().join("models/cube.obj")).unwrap();

    let scene = dir.path().join("scene.json");
    fs::write(
        &scene,
        r#"{
            "width": 64,
            "height": 48,
            "frames": 3,
            "lights": [{"direction": [0, 1, -1], "color": [255, 255, 255]}],
            "output": {"dir": "out", "prefix": "cube", "normals": true}
        }"#,
    )
    .unwrap();

    let config = Config::load(&scene).unwrap();
    let written = driver::run(&config).unwrap();

    assert_eq!(3, written.len());
    for (n, path) in written.iter().enumerate() {
        assert_eq!(dir.path().join(format!("out/cube{:02}.bmp", n)), *path);

        let bytes = fs::read(path).unwrap();
        assert_eq!(b"BM", &bytes[0..2]);
        assert_eq!(54 + 64 * 48 * 4, bytes.len());
        assert!(dir.path().join(format!("out/cube{:02}_normals.bmp", n)).exists());
    }
}

#[test]
fn driver_reports_bad_mesh() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.obj"), "v 0 0 0\nv 1 zero 0\n").unwrap();
    let scene = dir.path().join("scene.json");
    fs::write(&scene, r#"{"frames": 1, "model": {"path": "broken.obj"}}"#).unwrap();

    let config = Config::load(&scene).unwrap();
    let err = driver::run(&config).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{}", err);
}
