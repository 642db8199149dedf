use assert_cmd::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn scene_dir(mesh: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("mesh.obj"), mesh).expect("write mesh");
    fs::write(
        dir.path().join("scene.json"),
        r#"{
            "width": 32,
            "height": 24,
            "frames": 5,
            "model": {"path": "mesh.obj", "seed": 7},
            "lights": [{"direction": [1, 1, -1], "color": [255, 240, 220]}],
            "output": {"dir": "frames", "prefix": "shot"}
        }"#,
    )
    .expect("write scene");
    dir
}

fn cube() -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("models/cube.obj")).expect("bundled cube")
}

#[test]
fn cli_renders_requested_frames() {
    let dir = scene_dir(&cube());
    let mut cmd = Command::cargo_bin("prism").expect("binary exists");
    cmd.arg(dir.path().join("scene.json"))
        .arg("--frames")
        .arg("2")
        .arg("--sequential")
        .assert()
        .success();

    let frames = dir.path().join("frames");
    assert!(frames.join("shot00.bmp").exists());
    assert!(frames.join("shot01.bmp").exists());
    assert!(!frames.join("shot02.bmp").exists());
}

#[test]
fn cli_renders_depth_view() {
    let dir = scene_dir(&cube());
    let mut cmd = Command::cargo_bin("prism").expect("binary exists");
    cmd.arg(dir.path().join("scene.json"))
        .arg("--depth")
        .arg("--frames")
        .arg("1")
        .assert()
        .success();

    let bytes = fs::read(dir.path().join("frames/shot00.bmp")).expect("frame written");
    assert_eq!(54 + 32 * 24 * 4, bytes.len());
}

#[test]
fn cli_fails_on_malformed_mesh() {
    let dir = scene_dir("v 0 0 0\nv 1 zero 0\nv 0 1 0\nf 1 2 3\n");
    let mut cmd = Command::cargo_bin("prism").expect("binary exists");
    cmd.arg(dir.path().join("scene.json"))
        .assert()
        .failure()
        .stderr(contains("InvalidNumber"));
}

#[test]
fn cli_rejects_unknown_flags() {
    let mut cmd = Command::cargo_bin("prism").expect("binary exists");
    cmd.arg("--wireframe").assert().failure().stderr(contains("unknown argument"));
}

#[test]
fn cli_rejects_zero_frames() {
    let dir = scene_dir(&cube());
    let mut cmd = Command::cargo_bin("prism").expect("binary exists");
    cmd.arg(dir.path().join("scene.json"))
        .arg("--frames")
        .arg("0")
        .assert()
        .failure()
        .stderr(contains("Config"));
}
