//! End-to-end tests running the wind-contours binary.

use std::fs;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const SLICES: &str = r#"[
    {"timestamp": "2024-10-04T05:00:00Z", "data": [
        {"x": 0.0, "y": 0.0, "u": 1.0, "v": 0.0},
        {"x": 1.0, "y": 0.0, "u": 3.0, "v": 0.0},
        {"x": 0.0, "y": 1.0, "u": 1.0, "v": 0.0},
        {"x": 1.0, "y": 1.0, "u": 3.0, "v": 0.0}
    ]},
    {"timestamp": "2024-10-04T06:00:00Z", "data": [
        {"x": 1.0, "y": 1.0, "u": 0.0, "v": 4.0},
        {"x": 0.0, "y": 0.0, "u": 0.0, "v": 0.5},
        {"x": 1.0, "y": 0.0, "u": 0.0, "v": 4.0},
        {"x": 0.0, "y": 1.0, "u": 0.0, "v": 0.5}
    ]}
]"#;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wind-contours"));
    for key in [
        "CONTOUR_CONFIG",
        "CONTOUR_LEVELS",
        "CONTOUR_PRECISION",
        "CONTOUR_COLLISION_POLICY",
        "CONTOUR_ON_SLICE_ERROR",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn write_input(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("slices.json");
    fs::write(&path, content).unwrap();
    path
}

fn run<S: AsRef<OsStr>>(args: &[S]) -> Output {
    bin().args(args).output().unwrap()
}

#[test]
fn test_contours_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SLICES);
    let output = dir.path().join("contours.json");

    let result = run(&[&input, &output]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let records: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["timestamp"], "2024-10-04T05:00:00Z");
    assert_eq!(records[1]["timestamp"], "2024-10-04T06:00:00Z");
    assert_eq!(records[0]["levels"].as_array().unwrap().len(), 12);

    // Level 1.5 crosses the first slice at x = 0.25
    let line = records[0]["contours"][1][0].as_array().unwrap();
    for point in line {
        assert_eq!(point[0], 0.25);
    }
}

#[test]
fn test_contours_to_stdout_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SLICES);

    let first = run(&[&input]);
    let second = run(&[&input]);
    assert!(first.status.success());
    assert!(!first.stdout.is_empty());
    assert_eq!(first.stdout, second.stdout);

    let parsed: Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_vectors_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SLICES);

    let result = bin().arg(&input).args(["--mode", "vectors"]).output().unwrap();
    assert!(result.status.success());

    let parsed: Value = serde_json::from_slice(&result.stdout).unwrap();
    let first = &parsed[0]["data"][0];
    assert_eq!(first["lat"], "0.0000");
    assert_eq!(first["lng"], "0.0000");
    assert_eq!(first["u"], "1.0000");
    assert_eq!(parsed[1]["data"][0]["v"], "4.0000");
}

#[test]
fn test_level_override_from_env() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SLICES);

    let result = bin()
        .arg(&input)
        .env("CONTOUR_LEVELS", "2.0")
        .output()
        .unwrap();
    assert!(result.status.success());

    let parsed: Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(parsed[0]["levels"], serde_json::json!([2.0]));
    assert_eq!(parsed[0]["contours"][0][0][0][0], 0.5);
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let result = run(&[&dir.path().join("missing.json")]);
    assert!(!result.status.success());
}

#[test]
fn test_malformed_slice_is_skipped() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        r#"[{"timestamp": "t0", "data": [{"x": 0.0, "y": 0.0, "u": 1.0, "v": 0.0}]}]"#,
    );

    let result = run(&[&input]);
    assert!(result.status.success());
    let parsed: Value = serde_json::from_slice(&result.stdout).unwrap();
    assert!(parsed.as_array().unwrap().is_empty());

    let aborted = bin()
        .arg(&input)
        .env("CONTOUR_ON_SLICE_ERROR", "abort")
        .output()
        .unwrap();
    assert!(!aborted.status.success());
}
