// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for function resolution and pattern translation
//!
//! Both errors here are user-facing: an unknown function name or a
//! malformed LIKE pattern originates in the query text, not in the
//! analysis layer.

use thiserror::Error;

/// Result type alias for function resolution
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Errors raised when resolving a function name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// No overload is registered under the requested name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}

/// Result type alias for LIKE pattern translation
pub type LikePatternResult<T> = Result<T, LikePatternError>;

/// Errors raised when translating a LIKE pattern to a regular expression
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LikePatternError {
    /// The pattern ends in a lone backslash
    #[error("LIKE pattern '{pattern}' ends with an unterminated escape")]
    TrailingEscape { pattern: String },
}
