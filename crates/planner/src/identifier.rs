// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Column identifiers
//!
//! An opaque token naming one physical column occurrence for downstream
//! planning. Identifiers are allocated from a per-context counter and are
//! never reused; everything past the counter is a debugging aid, not part
//! of the identity.

use std::fmt;

/// Opaque unique token for a column occurrence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIdentifier(String);

impl ColumnIdentifier {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
