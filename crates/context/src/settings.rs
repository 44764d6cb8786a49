// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Analysis settings
//!
//! Settings arrive from the session layer, typically deserialized from a
//! client payload. Unknown fields are ignored and missing fields fall back
//! to their defaults, so older clients keep working.

use serde::{Deserialize, Serialize};

/// Settings consulted by the analysis layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Merge chains of LIKE/ILIKE disjuncts over one expression into a
    /// single multi-pattern match call.
    pub optimize_or_like_chain: bool,

    /// Maximum nesting depth of subqueries accepted by analysis.
    pub max_subquery_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            optimize_or_like_chain: true,
            max_subquery_depth: 100,
        }
    }
}
