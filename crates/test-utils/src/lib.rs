// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Test Utilities
//!
//! Shared fixtures and assertions for the analysis-layer test suites.
//! Only ever used as a dev-dependency.

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_dump_contains, assert_trees_equal};
pub use fixtures::{
    constant, ilike_call, like_call, or_chain, select_where, string_column, table,
};
