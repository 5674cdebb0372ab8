// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Undirected cost graph over registered points of sale
//!
//! Edges are stored as two mirrored adjacency records that always change
//! together. Endpoints are validated against the [`Registry`] on every
//! mutation, but deleting a point does not cascade: records pointing at a
//! deleted point stay until removed or purged, and queries ignore them.

use crate::error::{Error, Result};
use crate::paths::{Adjacency, SearchGraph};
use crate::registry::Registry;
use crate::sync::Stamped;
use crate::types::{EdgeRecord, MinPaths, Neighbor, Path, PathStep, PointOfSale};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// A point-in-time copy of the adjacency rows
#[derive(Debug, Clone)]
pub struct CostSnapshot {
    /// Graph write stamp the copy was taken at
    pub stamp: u64,
    adjacency: Adjacency,
}

impl CostSnapshot {
    /// Cost of the edge between two ids, if any
    #[must_use]
    pub fn cost(&self, a: &str, b: &str) -> Option<u64> {
        self.adjacency.get(a).and_then(|row| row.get(b)).copied()
    }

    /// Number of undirected edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|row| row.len()).sum::<usize>() / 2
    }

    /// The raw adjacency rows
    #[must_use]
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

/// The cost graph, sharing a registry with its callers
#[derive(Debug)]
pub struct CostGraph {
    /// Registry used to resolve and decorate endpoints
    registry: Arc<Registry>,
    /// `id -> (neighbor id -> cost)`, both directions present
    adjacency: Stamped<Adjacency>,
}

impl CostGraph {
    /// Create an empty graph over `registry`
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            adjacency: Stamped::new(Adjacency::new()),
        }
    }

    /// The registry this graph validates against
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Insert or overwrite the edge between two points
    pub fn upsert_edge(&self, from: &str, to: &str, cost: i64) -> Result<()> {
        let cost = u64::try_from(cost).map_err(|_| Error::NegativeCost(cost))?;
        let from_id = self.registry.resolve_id(from)?;
        let to_id = self.registry.resolve_id(to)?;
        if from_id == to_id {
            return Err(Error::SelfLoop(from_id));
        }

        self.adjacency.mutate(|adj| {
            adj.entry(from_id.clone()).or_default().insert(to_id.clone(), cost);
            adj.entry(to_id.clone()).or_default().insert(from_id.clone(), cost);
        });

        debug!(from = %from_id, to = %to_id, cost, "edge upserted");
        Ok(())
    }

    /// Remove the edge between two points; absent edges are not an error
    pub fn remove_edge(&self, from: &str, to: &str) -> Result<()> {
        let from_id = self.registry.resolve_id(from)?;
        let to_id = self.registry.resolve_id(to)?;

        let removed = self.adjacency.mutate(|adj| {
            let forward = unlink(adj, &from_id, &to_id);
            let backward = unlink(adj, &to_id, &from_id);
            forward || backward
        });

        if removed {
            debug!(from = %from_id, to = %to_id, "edge removed");
        } else {
            trace!(from = %from_id, to = %to_id, "no edge to remove");
        }
        Ok(())
    }

    /// Live neighbors of a point, ordered by name (case-insensitive) then id
    pub fn neighbors_of(&self, id_or_code: &str) -> Result<Vec<Neighbor>> {
        let id = self.registry.resolve_id(id_or_code)?;
        let row = self
            .adjacency
            .read(|adj| adj.get(&id).cloned().unwrap_or_default());

        let mut neighbors: Vec<Neighbor> = row
            .into_iter()
            .filter_map(|(neighbor_id, cost)| {
                let Some(point) = self.registry.find_by_id(&neighbor_id) else {
                    trace!(id = %neighbor_id, "skipping stale neighbor");
                    return None;
                };
                Some(Neighbor {
                    id: point.id,
                    name: point.name,
                    code: point.code,
                    cost,
                })
            })
            .collect();

        neighbors.sort_by_cached_key(|n| (n.name.to_lowercase(), n.id.clone()));
        Ok(neighbors)
    }

    /// Every minimum-cost path between two points
    #[instrument(level = "debug", skip(self))]
    pub fn shortest_paths(&self, from: &str, to: &str) -> Result<MinPaths> {
        let start = self.registry.resolve_id(from)?;
        let goal = self.registry.resolve_id(to)?;

        if start == goal {
            let point = self.registry.get(&start)?;
            return Ok(MinPaths {
                total_cost: 0,
                paths: vec![Path {
                    steps: vec![point.into()],
                }],
            });
        }

        // One registry view drives both the liveness filter and the step labels
        let snapshot = self.snapshot();
        let live: HashMap<&str, PointOfSale> = snapshot
            .adjacency
            .keys()
            .filter_map(|id| self.registry.find_by_id(id).map(|p| (id.as_str(), p)))
            .collect();
        let search = SearchGraph::from_adjacency(&snapshot.adjacency, |id| live.contains_key(id));
        let routes = search
            .min_paths(&start, &goal)
            .ok_or_else(|| Error::NoMinimumPath {
                from: start.clone(),
                to: goal.clone(),
            })?;
        debug!(
            stamp = snapshot.stamp,
            total_cost = %routes.total_cost,
            paths = routes.paths.len(),
            "minimum paths computed"
        );

        // Routes only visit nodes that passed the liveness filter
        let paths = routes
            .paths
            .into_iter()
            .map(|ids| Path {
                steps: ids
                    .iter()
                    .filter_map(|id| live.get(id.as_str()).cloned().map(PathStep::from))
                    .collect(),
            })
            .collect();

        Ok(MinPaths {
            total_cost: routes.total_cost,
            paths,
        })
    }

    /// Cost of the edge between two canonical ids, if present
    #[must_use]
    pub fn edge_cost(&self, a: &str, b: &str) -> Option<u64> {
        self.adjacency
            .read(|adj| adj.get(a).and_then(|row| row.get(b)).copied())
    }

    /// Number of undirected edges, stale ones included
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .read(|adj| adj.values().map(|row| row.len()).sum::<usize>() / 2)
    }

    /// Copy the adjacency rows under a consistent read
    #[must_use]
    pub fn snapshot(&self) -> CostSnapshot {
        let (stamp, adjacency) = self.adjacency.read_stamped(Clone::clone);
        CostSnapshot { stamp, adjacency }
    }

    /// Graph write stamp; changes whenever an edge mutation commits
    #[must_use]
    pub fn stamp(&self) -> u64 {
        self.adjacency.stamp()
    }

    /// Drop every record touching a point no longer in the registry.
    ///
    /// Returns the number of undirected edges removed.
    pub fn purge_stale_edges(&self) -> usize {
        // Liveness is checked outside the graph lock; ids are never reused,
        // so a point seen as dead here stays dead.
        let ids: Vec<String> = self.adjacency.read(|adj| adj.keys().cloned().collect());
        let stale: HashSet<String> = ids
            .into_iter()
            .filter(|id| !self.registry.contains(id))
            .collect();
        if stale.is_empty() {
            return 0;
        }

        let removed = self.adjacency.mutate(|adj| {
            let mut removed = 0;
            for id in &stale {
                if let Some(row) = adj.remove(id) {
                    for neighbor in row.keys() {
                        // Edges between two stale points are counted once
                        if stale.contains(neighbor) && neighbor < id {
                            continue;
                        }
                        unlink(adj, neighbor, id);
                        removed += 1;
                    }
                }
            }
            removed
        });

        debug!(points = stale.len(), edges = removed, "purged stale edges");
        removed
    }

    /// Every undirected edge once, `from < to`, sorted
    #[must_use]
    pub fn edges(&self) -> Vec<EdgeRecord> {
        let mut edges: Vec<EdgeRecord> = self.adjacency.read(|adj| {
            adj.iter()
                .flat_map(|(a, row)| {
                    row.iter()
                        .filter(move |(b, _)| a < *b)
                        .map(move |(b, &cost)| EdgeRecord {
                            from: a.clone(),
                            to: b.clone(),
                            cost,
                        })
                })
                .collect()
        });
        edges.sort();
        edges
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph costs {\n");
        dot.push_str("  layout=neato;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        // Add nodes
        for point in self.registry.find_all() {
            let label = format!("{}\\n{}", escape(&point.name), point.code);
            dot.push_str(&format!("  \"{}\" [label=\"{}\"];\n", point.id, label));
        }

        dot.push('\n');

        // Add edges
        for edge in self.edges() {
            dot.push_str(&format!(
                "  \"{}\" -- \"{}\" [label=\"{}\"];\n",
                edge.from, edge.to, edge.cost
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Remove `a -> b`, pruning `a`'s row when it empties
fn unlink(adj: &mut Adjacency, a: &str, b: &str) -> bool {
    let Some(row) = adj.get_mut(a) else {
        return false;
    };
    let removed = row.remove(b).is_some();
    if row.is_empty() {
        adj.remove(a);
    }
    removed
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
