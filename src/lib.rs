// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Posgraph library - concurrent registry and cost graph for points of sale
//!
//! This crate provides an in-memory registry that hands out stable ids,
//! names and short numeric codes for points of sale, and an undirected
//! weighted graph over those points that answers neighbor and
//! all-minimum-cost-path queries under concurrent load.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod paths;
pub mod registry;
pub mod sync;
pub mod topology;

pub use error::{Error, ErrorKind, Result};
pub use graph::CostGraph;
pub use registry::Registry;

/// Core value types shared by the registry, the graph and callers
pub mod types {
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Point of Sale
    // =========================================================================

    /// A registered point of sale
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PointOfSale {
        /// Canonical UUID, immutable
        pub id: String,
        /// Display name (trimmed)
        pub name: String,
        /// Short numeric alias, unique among live points
        pub code: u32,
    }

    // =========================================================================
    // Graph Results
    // =========================================================================

    /// A point adjacent to another, with the cost of the connecting edge
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Neighbor {
        /// Neighbor id
        pub id: String,
        /// Neighbor display name
        pub name: String,
        /// Neighbor code
        pub code: u32,
        /// Cost of the edge to this neighbor
        pub cost: u64,
    }

    /// One hop of a path, decorated for presentation
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PathStep {
        /// Point id
        pub id: String,
        /// Point name
        pub name: String,
        /// Point code
        pub code: u32,
    }

    impl From<PointOfSale> for PathStep {
        fn from(point: PointOfSale) -> Self {
            Self {
                id: point.id,
                name: point.name,
                code: point.code,
            }
        }
    }

    /// An ordered walk from a source point to a destination point
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Path {
        /// Steps from source to destination, inclusive
        pub steps: Vec<PathStep>,
    }

    impl Path {
        /// Ids along the path
        #[must_use]
        pub fn ids(&self) -> Vec<&str> {
            self.steps.iter().map(|s| s.id.as_str()).collect()
        }

        /// Names along the path
        #[must_use]
        pub fn names(&self) -> Vec<&str> {
            self.steps.iter().map(|s| s.name.as_str()).collect()
        }

        /// Codes along the path
        #[must_use]
        pub fn codes(&self) -> Vec<u32> {
            self.steps.iter().map(|s| s.code).collect()
        }
    }

    /// Every path tied for the minimum total cost between two points
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MinPaths {
        /// Shared total cost of every path
        pub total_cost: u128,
        /// The optimal paths, shortest hop count first
        pub paths: Vec<Path>,
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// One undirected edge, `from < to`
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct EdgeRecord {
        /// Lexicographically smaller endpoint id
        pub from: String,
        /// Lexicographically larger endpoint id
        pub to: String,
        /// Edge cost
        pub cost: u64,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind};
    pub use crate::graph::CostGraph;
    pub use crate::registry::Registry;
    pub use crate::types::*;
}
