// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the lowering layer

use thiserror::Error;

/// Result type alias for lowering operations
pub type LoweringResult<T> = Result<T, LoweringError>;

/// Errors that can occur during query tree to legacy syntax lowering
///
/// A malformed tree here is an internal-invariant violation: analysis
/// never hands a tree with missing fixed slots to lowering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoweringError {
    /// The node is missing a required child
    #[error("Missing required child node: expected '{expected}' in {context}")]
    MissingChild { context: String, expected: String },
}
