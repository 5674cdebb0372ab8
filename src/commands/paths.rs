// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Paths command - every minimum-cost path between two points

use super::Output;
use crate::graph::CostGraph;
use anyhow::Result;

/// Run the paths command
pub fn run(graph: &CostGraph, from: &str, to: &str, out: Output) -> Result<()> {
    let result = graph.shortest_paths(from, to)?;
    if out.json {
        return out.print_json(&result);
    }

    println!(
        "{}",
        out.heading(&format!(
            "Minimum cost {} ({} path{}):",
            out.cost(result.total_cost),
            result.paths.len(),
            if result.paths.len() == 1 { "" } else { "s" }
        ))
    );
    for path in &result.paths {
        let hops: Vec<String> = path
            .steps
            .iter()
            .map(|s| format!("{} [{}]", out.name(&s.name), s.code))
            .collect();
        println!("  {}", hops.join(" -> "));
    }
    Ok(())
}
