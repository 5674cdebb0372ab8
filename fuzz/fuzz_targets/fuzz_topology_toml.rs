// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use posgraph::topology::Topology;
use posgraph::{CostGraph, Registry};
use std::sync::Arc;

fuzz_target!(|data: &str| {
    let Ok(topology) = Topology::parse(data) else {
        return;
    };
    let graph = CostGraph::new(Arc::new(Registry::new()));
    let report = topology.apply(&graph);

    // Every entry is either applied or skipped
    assert_eq!(
        report.points + report.edges + report.skipped,
        topology.points.len() + topology.edges.len()
    );
    let _ = graph.to_dot();
});
