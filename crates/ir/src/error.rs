// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for query tree operations

use thiserror::Error;

use crate::node::NodeKind;

/// Result type alias for query tree operations
pub type IrResult<T> = Result<T, IrError>;

/// Errors raised by generic query tree operations
///
/// These are internal-invariant violations: a well-formed analysis never
/// produces them, and they abort the analysis of the current query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    /// An operation was applied to a node of the wrong kind
    #[error("Expected {expected} node, found {found}")]
    UnexpectedNodeKind { expected: NodeKind, found: NodeKind },

    /// A fixed child slot that must be present was absent
    #[error("Missing child at slot {slot} of {kind} node")]
    MissingChild { kind: NodeKind, slot: usize },

    /// A projection entry reached projection-column computation untyped
    #[error("Projection entry '{name}' has no result type")]
    UntypedProjectionEntry { name: String },
}
