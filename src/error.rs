// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the registry and cost graph
//!
//! Every variant carries the offending value so callers can render a
//! user-facing message without re-deriving context. Variants are grouped
//! into three kinds via [`Error::kind`].

use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; detected before any mutation
    InvalidInput,
    /// Something named by the caller does not exist
    NotFound,
    /// The request collides with existing state
    Conflict,
}

/// Errors from registry and graph operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A point name was empty or whitespace
    #[error("the name cannot be empty")]
    BlankName,

    /// An identifier was empty or whitespace
    #[error("the id cannot be empty")]
    BlankId,

    /// An explicit code outside the valid range (codes start at 1)
    #[error("invalid code: {0}")]
    InvalidCode(u32),

    /// Input that is neither a UUID nor a decimal code
    #[error("invalid id/code format: {0}")]
    InvalidIdOrCode(String),

    /// Edge cost below zero
    #[error("the cost must be >= 0, got {0}")]
    NegativeCost(i64),

    /// Edge whose endpoints resolve to the same point
    #[error("reflexive edge is not allowed: {0}")]
    SelfLoop(String),

    /// No live point has this id
    #[error("the point with id {0} does not exist")]
    PointNotFound(String),

    /// No live point has this code
    #[error("the point with code {0} does not exist")]
    CodeNotFound(u32),

    /// Destination unreachable from source
    #[error("there is no minimum path between {from} and {to}")]
    NoMinimumPath {
        /// Source point id
        from: String,
        /// Destination point id
        to: String,
    },

    /// Explicit code already owned by another point
    #[error("the code {0} already exists")]
    CodeInUse(u32),

    /// Explicit id already registered
    #[error("the id {0} already exists")]
    IdInUse(String),
}

impl Error {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankName
            | Self::BlankId
            | Self::InvalidCode(_)
            | Self::InvalidIdOrCode(_)
            | Self::NegativeCost(_)
            | Self::SelfLoop(_) => ErrorKind::InvalidInput,
            Self::PointNotFound(_) | Self::CodeNotFound(_) | Self::NoMinimumPath { .. } => {
                ErrorKind::NotFound
            }
            Self::CodeInUse(_) | Self::IdInUse(_) => ErrorKind::Conflict,
        }
    }
}

/// Result alias for registry and graph operations
pub type Result<T> = std::result::Result<T, Error>;
