// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Planner context
//!
//! Owned exclusively by one in-flight analysis of one query. The context
//! assigns stable identifiers to column occurrences and table expressions
//! and holds the per-table-expression column catalogs. Nested subqueries
//! get their own `PlannerContext`, all sharing one
//! [`GlobalPlannerContext`](crate::global_context::GlobalPlannerContext)
//! for the lifetime of the top-level query.
//!
//! All node maps key by node identity. Two structurally identical but
//! distinct node instances are different keys by design; the context never
//! unifies them.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sql_analyzer_context::ExecutionContext;
use sql_analyzer_ir::{NodeId, NodePayload, QueryTreeNodePtr};

use crate::error::{PlannerError, PlannerResult};
use crate::global_context::GlobalPlannerContextPtr;
use crate::identifier::ColumnIdentifier;
use crate::table_expression::TableExpressionColumns;

/// Per-query planning state
pub struct PlannerContext {
    /// Query execution context
    query_context: ExecutionContext,

    /// Context shared with the other planner contexts of this top-level
    /// query
    global_planner_context: GlobalPlannerContextPtr,

    /// Column node to assigned identifier
    column_node_to_identifier: HashMap<NodeId, ColumnIdentifier>,

    /// Table expression node to generated name
    table_expression_node_to_identifier: HashMap<NodeId, String>,

    /// Table expression node to its column catalog
    table_expression_node_to_columns: HashMap<NodeId, TableExpressionColumns>,

    column_identifier_counter: usize,

    table_expression_counter: usize,
}

impl PlannerContext {
    pub fn new(
        query_context: ExecutionContext,
        global_planner_context: GlobalPlannerContextPtr,
    ) -> Self {
        Self {
            query_context,
            global_planner_context,
            column_node_to_identifier: HashMap::new(),
            table_expression_node_to_identifier: HashMap::new(),
            table_expression_node_to_columns: HashMap::new(),
            column_identifier_counter: 0,
            table_expression_counter: 0,
        }
    }

    pub fn query_context(&self) -> &ExecutionContext {
        &self.query_context
    }

    pub fn global_planner_context(&self) -> &GlobalPlannerContextPtr {
        &self.global_planner_context
    }

    /// Allocate a fresh, never-before-returned column identifier.
    ///
    /// Pure allocation: nothing is registered. The identifier embeds the
    /// counter value, which alone guarantees uniqueness within this
    /// context; the source alias or table name and the column name are
    /// carried as a debugging aid.
    pub fn new_column_identifier(
        &mut self,
        source: &QueryTreeNodePtr,
        column_name: Option<&str>,
    ) -> ColumnIdentifier {
        let counter = self.column_identifier_counter;
        self.column_identifier_counter += 1;

        let mut suffix = {
            let borrowed = source.borrow();
            match borrowed.alias() {
                Some(alias) => alias.to_string(),
                None => match borrowed.payload() {
                    NodePayload::Table(table) => table.table_name.clone(),
                    NodePayload::Query(query) => query.cte_name.clone().unwrap_or_default(),
                    _ => String::new(),
                },
            }
        };
        if let Some(name) = column_name {
            if !suffix.is_empty() {
                suffix.push('.');
            }
            suffix.push_str(name);
        }

        let value = if suffix.is_empty() {
            format!("__column_{}", counter)
        } else {
            format!("__column_{}_{}", counter, suffix)
        };
        tracing::trace!(identifier = %value, "allocated column identifier");
        ColumnIdentifier::new(value)
    }

    /// Record the identifier assigned to a column node.
    ///
    /// Re-registering the same node with the same identifier is a no-op;
    /// re-registering with a different identifier is an internal-invariant
    /// violation.
    pub fn register_column(
        &mut self,
        column_node: &QueryTreeNodePtr,
        identifier: ColumnIdentifier,
    ) -> PlannerResult<()> {
        match self.column_node_to_identifier.entry(NodeId::of(column_node)) {
            Entry::Occupied(existing) => {
                if *existing.get() != identifier {
                    return Err(PlannerError::ConflictingColumnRegistration {
                        existing: existing.get().clone(),
                        requested: identifier,
                    });
                }
                Ok(())
            }
            Entry::Vacant(slot) => {
                slot.insert(identifier);
                Ok(())
            }
        }
    }

    /// Identifier registered for a column node.
    ///
    /// An unregistered node here means a column reference reached planning
    /// without ever being registered, which is an internal-invariant
    /// violation.
    pub fn get_column_identifier(
        &self,
        column_node: &QueryTreeNodePtr,
    ) -> PlannerResult<&ColumnIdentifier> {
        self.column_node_to_identifier
            .get(&NodeId::of(column_node))
            .ok_or(PlannerError::ColumnNotRegistered)
    }

    /// Identifier registered for a column node, or `None` when the node is
    /// legitimately not resolved yet.
    pub fn find_column_identifier(
        &self,
        column_node: &QueryTreeNodePtr,
    ) -> Option<&ColumnIdentifier> {
        self.column_node_to_identifier.get(&NodeId::of(column_node))
    }

    /// Generated name for a table expression node, allocated on first use
    /// and stable for the node afterwards.
    pub fn get_or_create_table_expression_identifier(
        &mut self,
        table_expression_node: &QueryTreeNodePtr,
    ) -> String {
        match self
            .table_expression_node_to_identifier
            .entry(NodeId::of(table_expression_node))
        {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                let identifier = format!("__table_{}", self.table_expression_counter);
                self.table_expression_counter += 1;
                slot.insert(identifier.clone());
                identifier
            }
        }
    }

    pub fn find_table_expression_identifier(
        &self,
        table_expression_node: &QueryTreeNodePtr,
    ) -> Option<&str> {
        self.table_expression_node_to_identifier
            .get(&NodeId::of(table_expression_node))
            .map(String::as_str)
    }

    /// Column catalog for a table expression node, created empty on first
    /// access.
    pub fn table_expression_columns_mut(
        &mut self,
        table_expression_node: &QueryTreeNodePtr,
    ) -> &mut TableExpressionColumns {
        self.table_expression_node_to_columns
            .entry(NodeId::of(table_expression_node))
            .or_default()
    }

    pub fn find_table_expression_columns(
        &self,
        table_expression_node: &QueryTreeNodePtr,
    ) -> Option<&TableExpressionColumns> {
        self.table_expression_node_to_columns
            .get(&NodeId::of(table_expression_node))
    }

    /// Iterate all table-expression catalogs registered so far.
    pub fn table_expression_columns(
        &self,
    ) -> impl Iterator<Item = (&NodeId, &TableExpressionColumns)> {
        self.table_expression_node_to_columns.iter()
    }
}
