// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! All-minimum-cost paths over a point-in-time adjacency snapshot
//!
//! The snapshot is loaded into a petgraph undirected graph. Dijkstra runs
//! over it while keeping, for every reached node, the *set* of predecessors
//! that achieve its best distance. Every optimal path is then recovered by
//! walking that predecessor relation back from the destination.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Adjacency rows keyed by point id: `id -> (neighbor id -> cost)`
pub type Adjacency = HashMap<String, HashMap<String, u64>>;

/// Minimum total cost plus every path (as id sequences) achieving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    /// Shared cost of every route; wide enough that no sum of `u64` costs wraps
    pub total_cost: u128,
    /// Id sequences from source to destination
    pub paths: Vec<Vec<String>>,
}

/// Immutable search structure built from an adjacency snapshot
pub struct SearchGraph {
    /// Undirected graph; node weights are point ids, edge weights costs
    graph: UnGraph<String, u64>,
    /// Map from point id to node index
    node_indices: HashMap<String, NodeIndex>,
}

impl SearchGraph {
    /// Build from adjacency rows, keeping only nodes for which `is_live` holds
    pub fn from_adjacency(adjacency: &Adjacency, is_live: impl Fn(&str) -> bool) -> Self {
        // Rows are mirrored, so every endpoint also owns a row
        let live: HashSet<&str> = adjacency
            .keys()
            .map(String::as_str)
            .filter(|id| is_live(id))
            .collect();

        let mut graph: UnGraph<String, u64> = UnGraph::with_capacity(live.len(), 0);
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::with_capacity(live.len());

        for (a, row) in adjacency {
            if !live.contains(a.as_str()) {
                continue;
            }
            for (b, &cost) in row {
                // Each undirected edge is stored in both rows; add it once
                if a >= b || !live.contains(b.as_str()) {
                    continue;
                }
                let a_idx = *node_indices
                    .entry(a.clone())
                    .or_insert_with(|| graph.add_node(a.clone()));
                let b_idx = *node_indices
                    .entry(b.clone())
                    .or_insert_with(|| graph.add_node(b.clone()));
                graph.add_edge(a_idx, b_idx, cost);
            }
        }

        Self { graph, node_indices }
    }

    /// Number of nodes that take part in at least one live edge
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live undirected edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every minimum-cost path from `from` to `to`, or `None` if unreachable
    #[must_use]
    pub fn min_paths(&self, from: &str, to: &str) -> Option<Routes> {
        if from == to {
            return Some(Routes {
                total_cost: 0,
                paths: vec![vec![from.to_string()]],
            });
        }

        let start = *self.node_indices.get(from)?;
        let goal = *self.node_indices.get(to)?;
        let (dist, preds) = self.dijkstra(start, goal);
        let total_cost = dist[goal.index()]?;

        let mut on_path = vec![false; self.graph.node_count()];
        on_path[goal.index()] = true;
        let mut stack = vec![goal];
        let mut paths = Vec::new();
        self.backtrack(start, goal, &preds, &mut on_path, &mut stack, &mut paths);

        paths.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        Some(Routes { total_cost, paths })
    }

    /// Label-setting search recording every tight predecessor.
    ///
    /// Runs until the popped distance exceeds the best distance to `goal`, so
    /// ties reached through zero-cost edges are still recorded.
    fn dijkstra(&self, start: NodeIndex, goal: NodeIndex) -> (Vec<Option<u128>>, Vec<Vec<NodeIndex>>) {
        let n = self.graph.node_count();
        let mut dist: Vec<Option<u128>> = vec![None; n];
        let mut preds: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
        let mut settled = vec![false; n];
        let mut best: Option<u128> = None;
        let mut heap = BinaryHeap::new();

        dist[start.index()] = Some(0);
        heap.push(Reverse((0_u128, start)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if best.is_some_and(|b| d > b) {
                break;
            }
            if settled[u.index()] {
                continue;
            }
            settled[u.index()] = true;
            if u == goal {
                best = Some(d);
            }

            for edge in self.graph.edges(u) {
                let v = if edge.source() == u { edge.target() } else { edge.source() };
                let alt = d + u128::from(*edge.weight());
                match dist[v.index()] {
                    Some(dv) if alt > dv => {}
                    Some(dv) if alt == dv => {
                        if !preds[v.index()].contains(&u) {
                            preds[v.index()].push(u);
                        }
                    }
                    _ => {
                        dist[v.index()] = Some(alt);
                        preds[v.index()] = vec![u];
                        heap.push(Reverse((alt, v)));
                    }
                }
            }
        }

        (dist, preds)
    }

    /// Depth-first walk over the predecessor relation from `current` to `start`
    fn backtrack(
        &self,
        start: NodeIndex,
        current: NodeIndex,
        preds: &[Vec<NodeIndex>],
        on_path: &mut [bool],
        stack: &mut Vec<NodeIndex>,
        out: &mut Vec<Vec<String>>,
    ) {
        if current == start {
            out.push(stack.iter().rev().map(|&i| self.graph[i].clone()).collect());
            return;
        }
        for &p in &preds[current.index()] {
            // Zero-cost cycles can make the relation cyclic; keep paths simple
            if on_path[p.index()] {
                continue;
            }
            on_path[p.index()] = true;
            stack.push(p);
            self.backtrack(start, p, preds, on_path, stack, out);
            stack.pop();
            on_path[p.index()] = false;
        }
    }
}
