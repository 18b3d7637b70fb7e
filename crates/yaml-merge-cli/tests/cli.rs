/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the yaml-merge binary.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn yaml_merge(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yaml-merge"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run yaml-merge")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write input");
    path
}

#[test]
fn test_merge_to_stdout() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.yml", "# service\nname: api\nreplicas: 1\n");
    write(&temp, "prod.yml", "replicas: 3 # scaled\nregion: eu\n");

    let output = yaml_merge(&["merge", "base.yml", "prod.yml"], temp.path());
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "# service\nname: api\nreplicas: 3 # scaled\nregion: eu\n"
    );
}

#[test]
fn test_merge_with_pruning_and_output_file() {
    let temp = TempDir::new().unwrap();
    write(&temp, "base.yml", "keep: 1\ndrop: 2\n");
    write(&temp, "overlay.yml", "drop: ~\n");

    let output = yaml_merge(
        &[
            "merge",
            "base.yml",
            "overlay.yml",
            "--prune-explicit",
            "-o",
            "out.yml",
        ],
        temp.path(),
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("out.yml")).unwrap(),
        "keep: 1\n"
    );
}

#[test]
fn test_merge_failure_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    write(&temp, "a.yml", "key: value\n");
    write(&temp, "b.yml", "key: [1, 2]\n");

    let output = yaml_merge(&["merge", "a.yml", "b.yml"], temp.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("b.yml"), "{stderr}");
    assert!(stderr.contains("invalid node kinds"), "{stderr}");
}

#[test]
fn test_prune_command() {
    let temp = TempDir::new().unwrap();
    write(&temp, "in.yml", "a:\nb: null\nc: 3\n");

    let output = yaml_merge(&["prune", "in.yml", "--implicit"], temp.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "b: null\nc: 3\n");
}

#[test]
fn test_indent_option() {
    let temp = TempDir::new().unwrap();
    write(&temp, "a.yml", "outer:\n  inner: 1\n");

    let output = yaml_merge(&["merge", "a.yml", "--indent", "4"], temp.path());
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "outer:\n    inner: 1\n"
    );
}

#[test]
fn test_dump_command() {
    let temp = TempDir::new().unwrap();
    write(&temp, "a.yml", "a: 1\n");

    let output = yaml_merge(&["dump", "a.yml"], temp.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("Mapping"));

    let output = yaml_merge(&["dump", "a.yml", "--json"], temp.path());
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "Document");
}
