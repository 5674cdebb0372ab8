// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Neighbors command - list the points directly connected to a point

use super::Output;
use crate::graph::CostGraph;
use anyhow::Result;

/// Run the neighbors command
pub fn run(graph: &CostGraph, key: &str, out: Output) -> Result<()> {
    let neighbors = graph.neighbors_of(key)?;
    if out.json {
        return out.print_json(&neighbors);
    }

    let id = graph.registry().resolve_id(key)?;
    let name = graph
        .registry()
        .find_by_id(&id)
        .map_or_else(|| id.clone(), |p| p.name);

    if neighbors.is_empty() {
        println!("{} has no neighbors", out.name(&name));
        return Ok(());
    }

    println!(
        "{}",
        out.heading(&format!("Neighbors of {} ({}):", out.name(&name), neighbors.len()))
    );
    for n in &neighbors {
        println!("  {:>4}  {}  cost {}", n.code, out.name(&n.name), out.cost(n.cost));
    }
    Ok(())
}
