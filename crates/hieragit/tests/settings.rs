//! Integration tests for settings files and their interaction with CLI flags.

use std::fs;
use std::process::Command;

const HIERA_CONFIG: &str = ":backends: [yaml]\n:hierarchy: [common]\n:yaml:\n  :datadir: data\n";

fn project_with_settings(settings: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("puppet")).unwrap();
    fs::write(dir.path().join("puppet/hiera.yaml"), HIERA_CONFIG).unwrap();

    let settings_dir = dir.path().join(".hieragit");
    fs::create_dir_all(&settings_dir).unwrap();
    fs::write(settings_dir.join("config.toml"), settings).unwrap();
    dir
}

#[test]
fn test_project_settings_select_hiera_config() {
    let dir = project_with_settings("[hiera]\nconfig = \"puppet/hiera.yaml\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_hieragit"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("hierarchy")
        .output()
        .expect("Failed to execute hieragit");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "common");
}

#[test]
fn test_config_flag_overrides_settings() {
    let dir = project_with_settings("[hiera]\nconfig = \"does/not/exist.yaml\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_hieragit"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["--config", "puppet/hiera.yaml", "backends"])
        .output()
        .expect("Failed to execute hieragit");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "yaml");
}

/// Invalid TOML falls back to defaults with a warning on stderr.
#[test]
fn test_warning_on_invalid_toml() {
    let dir = project_with_settings("invalid toml [[[");

    let output = Command::new(env!("CARGO_BIN_EXE_hieragit"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["--config", "puppet/hiera.yaml", "hierarchy"])
        .output()
        .expect("Failed to execute hieragit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load settings"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(output.status.success());
}

/// Settings that fail validation are reported and replaced by defaults.
#[test]
fn test_invalid_storage_kind_falls_back_to_defaults() {
    let dir = project_with_settings("[storage]\nkind = \"s3\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_hieragit"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["--config", "puppet/hiera.yaml", "hierarchy"])
        .output()
        .expect("Failed to execute hieragit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid storage kind 's3'"), "got: {}", stderr);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "common");
}
