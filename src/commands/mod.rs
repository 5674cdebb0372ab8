// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod export;
pub mod neighbors;
pub mod paths;
pub mod points;

use crate::config::Config;
use crate::graph::CostGraph;
use crate::registry::Registry;
use crate::topology::Topology;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// How command results are rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Print JSON instead of text
    pub json: bool,
    /// Style text output with ANSI colors
    pub color: bool,
}

impl Output {
    /// Render a section heading
    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render a point name
    #[must_use]
    pub fn name(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render an edge cost or path total
    #[must_use]
    pub fn cost(&self, cost: impl Into<u128>) -> String {
        let cost: u128 = cost.into();
        if self.color {
            cost.yellow().to_string()
        } else {
            cost.to_string()
        }
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }
}

/// Build a fresh graph and populate it from the topology file, if any
pub fn open_graph(topology: Option<&Path>, config: &Config) -> Result<CostGraph> {
    let registry = Arc::new(Registry::with_first_code(config.first_code));
    let graph = CostGraph::new(registry);

    let path = topology.or(config.topology.as_deref());
    match path {
        Some(path) => {
            let topology = Topology::load(path)
                .with_context(|| format!("Failed to load topology from {}", path.display()))?;
            let report = topology.apply(&graph);
            debug!(?report, path = %path.display(), "graph opened");
        }
        None => debug!("no topology configured, starting empty"),
    }

    Ok(graph)
}
