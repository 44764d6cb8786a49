// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for rewrite passes
//!
//! Passes themselves do not invent error conditions; they propagate what
//! the collaborating services raise. User-facing errors (an unresolvable
//! function name, a malformed LIKE pattern) pass through unmodified.

use thiserror::Error;

use sql_analyzer_function_registry::{LikePatternError, ResolverError};

/// Result type alias for rewrite passes
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Errors that can occur while running rewrite passes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    LikePattern(#[from] LikePatternError),
}
