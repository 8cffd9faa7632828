//! Configuration discovery driven through the compiled binary.
//!
//! Exercises the project-config walk, explicit `--config`, and environment
//! overrides end to end, using `scan --json` reports to observe the
//! effective settings.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command with user config isolated to an empty directory.
#[allow(deprecated)]
fn cmd(isolated_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("XDG_CONFIG_HOME", isolated_home.path());
    cmd
}

/// Create a project directory with a config file and a `corpus/` subdir.
fn project(config_name: &str, config_body: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(config_name), config_body).unwrap();
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("doc1.txt"), "the cat sat on the mat\n").unwrap();
    fs::write(corpus.join("doc2.txt"), "the cat sat on a rug\n").unwrap();
    dir
}

fn scan_report(home: &TempDir, dir: &TempDir, extra: &[&str]) -> serde_json::Value {
    let output = cmd(home)
        .arg("-C")
        .arg(dir.path())
        .args(["scan", "corpus", "--json"])
        .args(extra)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn project_config_sets_scan_defaults() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = 2\nthreshold = 1\n");
    let report = scan_report(&home, &dir, &[]);
    assert_eq!(report["window"], 2);
    assert_eq!(report["threshold"], 1);
}

#[test]
fn dotfile_config_is_discovered() {
    let home = TempDir::new().unwrap();
    let dir = project(".phrasedup.toml", "window_size = 3\n");
    let report = scan_report(&home, &dir, &[]);
    assert_eq!(report["window"], 3);
}

#[test]
fn config_discovered_from_parent_directory() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = 4\n");
    // Search starts in corpus/ and must walk up to find the config.
    let output = cmd(&home)
        .arg("-C")
        .arg(dir.path().join("corpus"))
        .args(["scan", ".", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["window"], 4);
}

#[test]
fn cli_flags_override_config_file() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = 2\nthreshold = 9\n");
    let report = scan_report(&home, &dir, &["--window", "5", "--threshold", "0"]);
    assert_eq!(report["window"], 5);
    assert_eq!(report["threshold"], 0);
}

#[test]
fn explicit_config_overrides_discovered_one() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = 2\n");
    let explicit = dir.path().join("special.toml");
    fs::write(&explicit, "window_size = 7\n").unwrap();
    let output = cmd(&home)
        .arg("-C")
        .arg(dir.path())
        .arg("--config")
        .arg("special.toml")
        .args(["scan", "corpus", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["window"], 7);
}

#[test]
fn environment_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "threshold = 0\n");
    let output = cmd(&home)
        .env("PHRASEDUP_THRESHOLD", "3")
        .arg("-C")
        .arg(dir.path())
        .args(["scan", "corpus", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["threshold"], 3);
}

#[test]
fn config_extraction_policy_applies() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "extraction = \"per-pair\"\n");
    let report = scan_report(&home, &dir, &[]);
    assert_eq!(report["policy"], "per-pair");
}

#[test]
fn config_include_filters_the_corpus() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "include = [\"*.txt\"]\n");
    fs::write(
        dir.path().join("corpus").join("notes.md"),
        "the cat sat on the mat\n",
    )
    .unwrap();
    let report = scan_report(&home, &dir, &[]);
    assert_eq!(report["documents"], 2);
}

#[test]
fn config_exclude_filters_the_corpus() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "exclude = [\"doc2.*\"]\n");
    let report = scan_report(&home, &dir, &[]);
    assert_eq!(report["documents"], 1);
    assert_eq!(report["pairs_compared"], 0);
}

#[test]
fn invalid_config_fails_fast() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = \"many\"\n");
    cmd(&home)
        .arg("-C")
        .arg(dir.path())
        .args(["scan", "corpus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn info_reports_the_loaded_config_file() {
    let home = TempDir::new().unwrap();
    let dir = project("phrasedup.toml", "window_size = 2\n");
    let output = cmd(&home)
        .arg("-C")
        .arg(dir.path())
        .args(["info", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["config"]["window_size"], 2);
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("phrasedup.toml")
    );
}
