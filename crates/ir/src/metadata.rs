// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types shared across the analysis layer
//!
//! Column (name, type) pairs as produced by projection computation and
//! consumed by the planner's table-expression catalogs, and the resolved
//! function overload descriptor handed out by the function resolver.

use serde::{Deserialize, Serialize};

use crate::value::DataType;

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameAndType {
    pub name: String,
    pub data_type: DataType,
}

impl NameAndType {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A resolved function overload
///
/// Produced by the function resolver; function nodes hold a shared handle
/// to one of these once they are resolved. The descriptor is opaque to the
/// query tree: equality of two function nodes compares names and result
/// types, never overload handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFunction {
    /// Canonical function name as known to the resolver
    pub name: String,

    /// Minimum number of arguments the overload accepts
    pub min_arguments: usize,

    /// Whether the overload accepts more than `min_arguments` arguments
    pub variadic: bool,
}

impl ResolvedFunction {
    pub fn new(name: impl Into<String>, min_arguments: usize, variadic: bool) -> Self {
        Self {
            name: name.into(),
            min_arguments,
            variadic,
        }
    }
}
