// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Subquery-backed set descriptors
//!
//! Physical planning materializes IN-subqueries and similar constructs
//! into sets. The analysis layer only describes them; the global planner
//! context deduplicates the descriptors so one subquery is materialized
//! once per top-level query.

use std::rc::Rc;

use sql_analyzer_ir::{DataType, QueryTreeNodePtr};

/// Descriptor of a deduplicated, subquery-backed set
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSet {
    element_types: Vec<DataType>,
}

impl PlannedSet {
    pub fn new(element_types: Vec<DataType>) -> Self {
        Self { element_types }
    }

    pub fn element_types(&self) -> &[DataType] {
        &self.element_types
    }
}

/// Deferred materialization of a subquery into a set
#[derive(Debug, Clone)]
pub struct SubqueryForSet {
    /// The subquery node producing the set contents
    pub subquery: QueryTreeNodePtr,

    /// The set the subquery fills
    pub set: Rc<PlannedSet>,
}
