// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the planner context
//!
//! Every error in this module is an internal-invariant violation: it
//! indicates a bug in the analysis, not bad user input. These errors are
//! never retried and never caught inside the layer; they propagate out and
//! abort the analysis of the current query.

use thiserror::Error;

use crate::identifier::ColumnIdentifier;

/// Result type alias for planner context operations
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Internal-invariant violations detected by the planner context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// A column node was re-registered with a different identifier
    #[error(
        "Column node already registered with identifier {existing}, cannot re-register as {requested}"
    )]
    ConflictingColumnRegistration {
        existing: ColumnIdentifier,
        requested: ColumnIdentifier,
    },

    /// A column reference reached planning without ever being registered
    #[error("Column node is not registered in the planner context")]
    ColumnNotRegistered,

    /// A column name was inserted twice into one table-expression catalog
    #[error("Column with name {0} already exists in table expression")]
    DuplicateColumnName(String),

    /// No identifier is recorded for a column name in a table-expression
    /// catalog
    #[error("Column identifier for name {0} does not exist")]
    ColumnIdentifierMissing(String),
}
