// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Generic tree operations
//!
//! Structural equality, hashing, cloning, semantic naming and projection
//! column computation are defined once here and reused for every node
//! kind. A node only contributes its own scalar attributes; combining the
//! children is the walker's job.
//!
//! - Equality: own attributes plus alias, kind mismatch is always unequal,
//!   then the recursive combination over children slots.
//! - Hashing: a rolling 128-bit digest fed with the same attribute set as
//!   equality, plus per-slot presence markers and length prefixes so that
//!   sibling shifts change the digest.
//! - Cloning: deep copy that preserves aliasing (a node shared between two
//!   parents is cloned once) and re-points column source links landing
//!   inside the cloned subtree; links escaping it stay aliased.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::{IrError, IrResult};
use crate::metadata::NameAndType;
use crate::node::{
    query_children, NodeId, NodeKind, NodePayload, QueryTreeNode, QueryTreeNodePtr,
};
use crate::value::Value;

/// 128-bit structural hash of a query tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeHash(pub u128);

/// Structural equality of two trees.
pub fn tree_equal(lhs: &QueryTreeNodePtr, rhs: &QueryTreeNodePtr) -> bool {
    if Rc::ptr_eq(lhs, rhs) {
        return true;
    }

    let left = lhs.borrow();
    let right = rhs.borrow();

    if left.kind() != right.kind() || left.alias() != right.alias() {
        return false;
    }
    if !payload_equal(left.payload(), right.payload()) {
        return false;
    }
    if left.children().len() != right.children().len() {
        return false;
    }

    left.children()
        .iter()
        .zip(right.children())
        .all(|(a, b)| match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => tree_equal(a, b),
            _ => false,
        })
}

fn payload_equal(lhs: &NodePayload, rhs: &NodePayload) -> bool {
    match (lhs, rhs) {
        (NodePayload::Query(a), NodePayload::Query(b)) => a == b,
        (NodePayload::Function(a), NodePayload::Function(b)) => {
            a.function_name == b.function_name && a.result_type() == b.result_type()
        }
        (NodePayload::Constant(a), NodePayload::Constant(b)) => a == b,
        (NodePayload::List, NodePayload::List) => true,
        (NodePayload::Column(a), NodePayload::Column(b)) => {
            a.column_name == b.column_name && a.result_type == b.result_type
        }
        (NodePayload::Table(a), NodePayload::Table(b)) => a == b,
        _ => false,
    }
}

/// 128-bit structural hash of a tree.
///
/// Trees that compare equal under [`tree_equal`] hash equal. The planner
/// keys its deduplicated-set registry by this hash.
pub fn tree_hash(node: &QueryTreeNodePtr) -> TreeHash {
    let mut digest = md5::Context::new();
    update_tree_hash(node, &mut digest);
    TreeHash(u128::from_be_bytes(digest.compute().0))
}

fn update_tree_hash(node: &QueryTreeNodePtr, digest: &mut md5::Context) {
    let borrowed = node.borrow();

    digest.consume([kind_tag(borrowed.kind())]);
    match borrowed.alias() {
        Some(alias) => consume_str(digest, alias),
        None => digest.consume([0u8]),
    }
    update_payload_hash(borrowed.payload(), digest);

    digest.consume((borrowed.children().len() as u64).to_le_bytes());
    for child in borrowed.children() {
        match child {
            Some(child) => {
                digest.consume([1u8]);
                update_tree_hash(child, digest);
            }
            None => digest.consume([0u8]),
        }
    }
}

fn update_payload_hash(payload: &NodePayload, digest: &mut md5::Context) {
    match payload {
        NodePayload::Query(query) => {
            consume_bool(digest, query.is_subquery);
            consume_bool(digest, query.is_cte);
            consume_bool(digest, query.is_distinct);
            consume_bool(digest, query.is_limit_with_ties);
            match &query.cte_name {
                Some(name) => consume_str(digest, name),
                None => digest.consume([0u8]),
            }
        }
        NodePayload::Function(function) => {
            consume_str(digest, &function.function_name);
            match function.result_type() {
                Some(result_type) => consume_str(digest, &result_type.to_string()),
                None => digest.consume([0u8]),
            }
        }
        NodePayload::Constant(constant) => {
            consume_value(digest, &constant.value);
            consume_str(digest, &constant.result_type.to_string());
        }
        NodePayload::List => {}
        NodePayload::Column(column) => {
            consume_str(digest, &column.column_name);
            consume_str(digest, &column.result_type.to_string());
        }
        NodePayload::Table(table) => consume_str(digest, &table.table_name),
    }
}

fn consume_value(digest: &mut md5::Context, value: &Value) {
    match value {
        Value::Boolean(v) => {
            digest.consume([1u8]);
            consume_bool(digest, *v);
        }
        Value::UInt64(v) => {
            digest.consume([2u8]);
            digest.consume(v.to_le_bytes());
        }
        Value::Int64(v) => {
            digest.consume([3u8]);
            digest.consume(v.to_le_bytes());
        }
        Value::Float64(v) => {
            digest.consume([4u8]);
            digest.consume(v.to_bits().to_le_bytes());
        }
        Value::String(v) => {
            digest.consume([5u8]);
            consume_str(digest, v);
        }
        Value::Array(items) => {
            digest.consume([6u8]);
            digest.consume((items.len() as u64).to_le_bytes());
            for item in items {
                consume_value(digest, item);
            }
        }
    }
}

fn consume_str(digest: &mut md5::Context, value: &str) {
    digest.consume((value.len() as u64).to_le_bytes());
    digest.consume(value.as_bytes());
}

fn consume_bool(digest: &mut md5::Context, value: bool) {
    digest.consume([if value { 1u8 } else { 0u8 }]);
}

fn kind_tag(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Query => 1,
        NodeKind::Function => 2,
        NodeKind::Constant => 3,
        NodeKind::List => 4,
        NodeKind::Column => 5,
        NodeKind::Table => 6,
    }
}

/// Deep copy of a tree.
///
/// A node aliased into several parents inside the subtree is cloned once,
/// so the copy has the same sharing structure as the original. Column
/// source links whose target lies inside the cloned subtree are re-pointed
/// to the corresponding copy; links escaping it stay aliased to the
/// original sources.
pub fn clone_tree(node: &QueryTreeNodePtr) -> QueryTreeNodePtr {
    let mut mapping: HashMap<NodeId, QueryTreeNodePtr> = HashMap::new();
    let cloned = clone_node(node, &mut mapping);
    let mut visited = HashSet::new();
    repoint_column_sources(&cloned, &mapping, &mut visited);
    cloned
}

fn clone_node(
    node: &QueryTreeNodePtr,
    mapping: &mut HashMap<NodeId, QueryTreeNodePtr>,
) -> QueryTreeNodePtr {
    if let Some(existing) = mapping.get(&NodeId::of(node)) {
        return existing.clone();
    }

    let borrowed = node.borrow();
    let children = borrowed
        .children()
        .iter()
        .map(|child| child.as_ref().map(|child| clone_node(child, mapping)))
        .collect();
    let cloned = QueryTreeNode::from_parts(borrowed.payload().clone(), borrowed.alias(), children);

    mapping.insert(NodeId::of(node), cloned.clone());
    cloned
}

fn repoint_column_sources(
    node: &QueryTreeNodePtr,
    mapping: &HashMap<NodeId, QueryTreeNodePtr>,
    visited: &mut HashSet<NodeId>,
) {
    if !visited.insert(NodeId::of(node)) {
        return;
    }

    let old_source = node
        .borrow()
        .as_column()
        .and_then(|column| column.source())
        .and_then(|source| mapping.get(&NodeId::of(&source)).cloned());
    if let Some(new_source) = old_source {
        if let Some(column) = node.borrow_mut().as_column_mut() {
            column.set_source(&new_source);
        }
    }

    let children: Vec<_> = node.borrow().children().iter().flatten().cloned().collect();
    for child in children {
        repoint_column_sources(&child, mapping, visited);
    }
}

/// Deterministic semantic signature of a tree.
///
/// Used for result-column naming and diagnostics. Depends only on the
/// semantic content of the tree, never on formatting.
pub fn semantic_name(node: &QueryTreeNodePtr) -> String {
    let borrowed = node.borrow();
    match borrowed.payload() {
        NodePayload::Query(_) => query_name(&borrowed),
        NodePayload::Function(function) => {
            let arguments = borrowed
                .child(crate::node::function_children::ARGUMENTS)
                .map(|arguments| semantic_name(&arguments))
                .unwrap_or_default();
            format!("{}({})", function.function_name, arguments)
        }
        NodePayload::Constant(constant) => constant.value.to_string(),
        NodePayload::List => borrowed
            .children()
            .iter()
            .flatten()
            .map(semantic_name)
            .collect::<Vec<_>>()
            .join(", "),
        NodePayload::Column(column) => column.column_name.clone(),
        NodePayload::Table(table) => table.table_name.clone(),
    }
}

fn query_name(query: &QueryTreeNode) -> String {
    let mut name = String::new();

    if let Some(with) = query.child(query_children::WITH) {
        if !with.borrow().list_nodes().is_empty() {
            name.push_str(&semantic_name(&with));
            name.push(' ');
        }
    }

    name.push_str("SELECT ");
    if let Some(projection) = query.child(query_children::PROJECTION) {
        name.push_str(&semantic_name(&projection));
    }

    if let Some(join_tree) = query.child(query_children::JOIN_TREE) {
        name.push_str(" FROM ");
        name.push_str(&semantic_name(&join_tree));
    }
    if let Some(prewhere) = query.child(query_children::PREWHERE) {
        name.push_str(" PREWHERE ");
        name.push_str(&semantic_name(&prewhere));
    }
    if let Some(where_clause) = query.child(query_children::WHERE) {
        name.push_str(" WHERE ");
        name.push_str(&semantic_name(&where_clause));
    }
    if let Some(group_by) = query.child(query_children::GROUP_BY) {
        if !group_by.borrow().list_nodes().is_empty() {
            name.push_str(&semantic_name(&group_by));
        }
    }

    name
}

/// Ordered output columns of a query node.
///
/// Each projection entry contributes its alias when present, its semantic
/// name otherwise, together with its result type.
pub fn projection_columns(query: &QueryTreeNodePtr) -> IrResult<Vec<NameAndType>> {
    let borrowed = query.borrow();
    if borrowed.kind() != NodeKind::Query {
        return Err(IrError::UnexpectedNodeKind {
            expected: NodeKind::Query,
            found: borrowed.kind(),
        });
    }

    let projection =
        borrowed
            .child(query_children::PROJECTION)
            .ok_or(IrError::MissingChild {
                kind: NodeKind::Query,
                slot: query_children::PROJECTION,
            })?;

    let mut columns = Vec::new();
    for entry in projection.borrow().list_nodes() {
        let name = match entry.borrow().alias() {
            Some(alias) => alias.to_string(),
            None => semantic_name(&entry),
        };
        let data_type = entry
            .borrow()
            .result_type()
            .ok_or_else(|| IrError::UntypedProjectionEntry { name: name.clone() })?;
        columns.push(NameAndType::new(name, data_type));
    }

    Ok(columns)
}
