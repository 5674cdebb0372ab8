// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the posgraph CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TOPOLOGY: &str = r#"
[[points]]
name = "Depot"
code = 1

[[points]]
name = "Harbor"
code = 2

[[points]]
name = "Market"
code = 3

[[points]]
name = "Island"
code = 9

[[edges]]
from = "1"
to = "2"
cost = 1

[[edges]]
from = "2"
to = "3"
cost = 1

[[edges]]
from = "1"
to = "3"
cost = 2
"#;

/// Write the sample topology into a fresh directory
fn sample_topology() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("topology.toml");
    fs::write(&path, TOPOLOGY).unwrap();
    (dir, path)
}

/// A posgraph command isolated from the user's config and environment
fn posgraph(dir: &TempDir, topology: &Path) -> Command {
    let mut cmd = Command::cargo_bin("posgraph").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("POSGRAPH_CONFIG")
        .env_remove("POSGRAPH_TOPOLOGY")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--topology")
        .arg(topology);
    cmd
}

#[test]
fn test_points_lists_every_point() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .arg("points")
        .assert()
        .success()
        .stdout(predicate::str::contains("Points (4):"))
        .stdout(predicate::str::contains("Depot"))
        .stdout(predicate::str::contains("Island"));
}

#[test]
fn test_paths_reports_ties() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .args(["paths", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Minimum cost 2 (2 paths):"))
        .stdout(predicate::str::contains("Depot [1] -> Market [3]"))
        .stdout(predicate::str::contains("Depot [1] -> Harbor [2] -> Market [3]"));
}

#[test]
fn test_paths_json() {
    let (dir, topology) = sample_topology();

    let output = posgraph(&dir, &topology)
        .args(["--json", "paths", "1", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_cost"], 2);
    let paths = value["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    // Shorter path first
    assert_eq!(paths[0]["steps"].as_array().unwrap().len(), 2);
}

#[test]
fn test_unreachable_pair_fails() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .args(["paths", "1", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("there is no minimum path"));
}

#[test]
fn test_unknown_code_fails() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .args(["neighbors", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the point with code 42 does not exist"));
}

#[test]
fn test_neighbors_with_costs() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .args(["neighbors", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neighbors of Harbor (2):"))
        .stdout(predicate::str::contains("Depot  cost 1"))
        .stdout(predicate::str::contains("Market  cost 1"));
}

#[test]
fn test_resolve_code_and_bad_input() {
    let (dir, topology) = sample_topology();

    let output = posgraph(&dir, &topology)
        .args(["resolve", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(id.len(), 36);

    // Ids are random per process; only codes are stable across runs
    posgraph(&dir, &topology)
        .args(["resolve", "not-a-code"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid id/code format"));
}

#[test]
fn test_export_dot_to_file() {
    let (dir, topology) = sample_topology();
    let out = dir.path().join("graph.dot");

    posgraph(&dir, &topology)
        .args(["export", "--format", "dot", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.starts_with("graph costs {"));
    assert!(dot.contains("--"));
}

#[test]
fn test_missing_topology_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    posgraph(&dir, &missing)
        .arg("points")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load topology"));
}

#[test]
fn test_completions() {
    let (dir, topology) = sample_topology();

    posgraph(&dir, &topology)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("posgraph"));
}
