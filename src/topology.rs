// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Declarative topology files: points and the edges between them
//!
//! Loading is best effort. Each entry that fails is logged and counted, and
//! the rest of the file still applies.

use crate::graph::CostGraph;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A point to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSpec {
    /// Display name
    pub name: String,
    /// Explicit code; allocated when omitted
    #[serde(default)]
    pub code: Option<u32>,
}

/// An edge to install; endpoints are ids or codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// First endpoint
    pub from: String,
    /// Second endpoint
    pub to: String,
    /// Edge cost
    pub cost: i64,
}

/// Contents of a topology file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Points, registered in order
    #[serde(default)]
    pub points: Vec<PointSpec>,
    /// Edges, installed after all points
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Outcome of applying a topology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Points created or reused
    pub points: usize,
    /// Edges installed
    pub edges: usize,
    /// Entries that failed and were skipped
    pub skipped: usize,
}

impl Topology {
    /// Parse a topology from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse topology")
    }

    /// Read and parse a topology file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid topology in {}", path.display()))
    }

    /// Register the points, then install the edges
    pub fn apply(&self, graph: &CostGraph) -> LoadReport {
        let registry = graph.registry();
        let mut report = LoadReport::default();

        for spec in &self.points {
            match registry.create(&spec.name, spec.code) {
                Ok(_) => report.points += 1,
                Err(err) => {
                    if registry.find_by_name(&spec.name).is_some() {
                        report.points += 1;
                    } else {
                        warn!(name = %spec.name, error = %err, "could not create point");
                        report.skipped += 1;
                    }
                }
            }
        }

        for spec in &self.edges {
            match graph.upsert_edge(&spec.from, &spec.to, spec.cost) {
                Ok(()) => report.edges += 1,
                Err(err) => {
                    warn!(from = %spec.from, to = %spec.to, cost = spec.cost, error = %err, "failed to create edge");
                    report.skipped += 1;
                }
            }
        }

        info!(
            points = report.points,
            edges = report.edges,
            skipped = report.skipped,
            "topology loaded"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::sync::Arc;

    const SAMPLE: &str = r#"
[[points]]
name = "north"
code = 1

[[points]]
name = "south"
code = 2

[[points]]
name = "east"

[[edges]]
from = "1"
to = "2"
cost = 4

[[edges]]
from = "2"
to = "3"
cost = 1
"#;

    #[test]
    fn test_parse_and_apply() {
        let topology = Topology::parse(SAMPLE).unwrap();
        assert_eq!(topology.points.len(), 3);
        assert_eq!(topology.points[2].code, None);

        let registry = Arc::new(Registry::new());
        let graph = CostGraph::new(Arc::clone(&registry));
        let report = topology.apply(&graph);

        assert_eq!(report, LoadReport { points: 3, edges: 2, skipped: 0 });
        assert_eq!(registry.find_by_name("east").unwrap().code, 3);
        assert_eq!(graph.shortest_paths("1", "3").unwrap().total_cost, 5);
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let text = r#"
[[points]]
name = "a"
code = 1

[[points]]
name = "a"
code = 1

[[points]]
name = "   "

[[edges]]
from = "1"
to = "1"
cost = 3

[[edges]]
from = "1"
to = "9"
cost = 3
"#;
        let topology = Topology::parse(text).unwrap();
        let registry = Arc::new(Registry::new());
        let graph = CostGraph::new(Arc::clone(&registry));
        let report = topology.apply(&graph);

        // The duplicate is reused by name; blank name and both edges fail
        assert_eq!(report, LoadReport { points: 2, edges: 0, skipped: 3 });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Topology::parse("points = 3").is_err());
    }
}
