//! Integration tests for the cdl binary
//!
//! Each test runs in its own temporary directory so no cdl.toml or data
//! directory from the workspace leaks in.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn cdl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cdl"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(cdl_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("CDL_ROOT")
        .env_remove("CDL_DOWNLOAD")
        .env_remove("CDL_CHECKSUM")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

fn parse_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_config_json_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["config", "--json"]);

    assert!(output.status.success());
    let parsed = parse_json(&output);
    assert_eq!(parsed["status"], "success");

    let values = parsed["data"]["values"].as_array().unwrap();
    let root = values.iter().find(|entry| entry["key"] == "root").unwrap();
    assert_eq!(root["value"], "data");
    assert_eq!(root["source"], "Default");
}

#[test]
fn test_config_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cdl.toml"), "root = \"/srv/cdl\"\nchecksum = true\n").unwrap();

    let output = run(dir.path(), &["config", "--json", "--download"]);
    let parsed = parse_json(&output);
    let values = parsed["data"]["values"].as_array().unwrap();
    let value = |key: &str| values.iter().find(|entry| entry["key"] == key).unwrap().clone();

    assert_eq!(parsed["data"]["config_file"], "cdl.toml");
    assert_eq!(value("root")["value"], "/srv/cdl");
    assert_eq!(value("root")["source"], "File");
    assert_eq!(value("checksum")["value"], "true");
    assert_eq!(value("download")["source"], "Cli");
}

#[test]
fn test_verify_empty_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = run(dir.path(), &["verify", "--json", "--root", root]);

    assert!(!output.status.success());
    let parsed = parse_json(&output);
    assert_eq!(parsed["data"]["complete"], false);
    assert_eq!(parsed["data"]["archives"].as_array().unwrap().len(), 13);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cdl download"));
}

#[test]
fn test_inspect_empty_root_fails_integrity() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = run(dir.path(), &["inspect", "--root", root]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dataset not found or corrupted"));
}

#[test]
fn test_query_rejects_reversed_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &[
            "query", "--minx", "60", "--maxx", "10", "--miny", "10", "--maxy", "60", "--start",
            "2015-06-01",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bounding volume"));
}
