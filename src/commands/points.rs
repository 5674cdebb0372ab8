// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Point commands - list, show and resolve points of sale

use super::Output;
use crate::graph::CostGraph;
use anyhow::Result;

/// List every registered point
pub fn run_list(graph: &CostGraph, out: Output) -> Result<()> {
    let points = graph.registry().find_all();
    if out.json {
        return out.print_json(&points);
    }

    if points.is_empty() {
        println!("No points registered. Pass a topology file with --topology.");
        return Ok(());
    }

    println!("{}", out.heading(&format!("Points ({}):", points.len())));
    for point in &points {
        println!("  {:>4}  {}  {}", point.code, out.name(&point.name), point.id);
    }
    Ok(())
}

/// Show a single point by id or code
pub fn run_show(graph: &CostGraph, key: &str, out: Output) -> Result<()> {
    let registry = graph.registry();
    let id = registry.resolve_id(key)?;
    let point = registry.get(&id)?;
    if out.json {
        return out.print_json(&point);
    }

    let degree = graph.neighbors_of(&id)?.len();
    println!("{}", out.heading(&format!("Point: {}", out.name(&point.name))));
    println!("  id: {}", point.id);
    println!("  code: {}", point.code);
    println!("  neighbors: {degree}");
    Ok(())
}

/// Print the canonical id for an id or code
pub fn run_resolve(graph: &CostGraph, key: &str, out: Output) -> Result<()> {
    let id = graph.registry().resolve_id(key)?;
    if out.json {
        return out.print_json(&serde_json::json!({ "input": key, "id": id }));
    }
    println!("{id}");
    Ok(())
}
