// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the cost graph to various formats

use crate::graph::CostGraph;
use crate::types::{EdgeRecord, PointOfSale};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown export format: {}. Supported: dot, json", other),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }
}

/// JSON export document
#[derive(Debug, Serialize)]
struct GraphExport {
    points: Vec<PointOfSale>,
    edges: Vec<EdgeRecord>,
}

/// Render the graph in the given format
pub fn render(graph: &CostGraph, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Dot => Ok(graph.to_dot()),
        ExportFormat::Json => {
            let doc = GraphExport {
                points: graph.registry().find_all(),
                edges: graph.edges(),
            };
            serde_json::to_string_pretty(&doc).context("Failed to serialize graph to JSON")
        }
    }
}

/// Run the export command
pub fn run(graph: &CostGraph, format: &str, output: Option<PathBuf>) -> Result<()> {
    let export_format: ExportFormat = format.parse()?;
    info!("Exporting to {}", export_format.extension());

    if graph.registry().is_empty() {
        eprintln!("Warning: Graph is empty. Pass a topology file with --topology.");
    }

    let content = render(graph, export_format)?;

    // Write output
    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
