// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Query tree fixtures for tests

use sql_analyzer_function_registry::builtin;
use sql_analyzer_ir::{
    DataType, QueryNodeBuilder, QueryTreeNode, QueryTreeNodePtr, Value,
};

pub fn table(name: &str) -> QueryTreeNodePtr {
    QueryTreeNode::new_table(name)
}

pub fn string_column(name: &str, source: &QueryTreeNodePtr) -> QueryTreeNodePtr {
    QueryTreeNode::new_column(name, DataType::String, source)
}

pub fn constant(value: impl Into<Value>) -> QueryTreeNodePtr {
    QueryTreeNode::new_constant(value.into())
}

pub fn like_call(target: &QueryTreeNodePtr, pattern: &str) -> QueryTreeNodePtr {
    QueryTreeNode::new_function(builtin::LIKE, vec![target.clone(), constant(pattern)])
}

pub fn ilike_call(target: &QueryTreeNodePtr, pattern: &str) -> QueryTreeNodePtr {
    QueryTreeNode::new_function(builtin::ILIKE, vec![target.clone(), constant(pattern)])
}

pub fn or_chain(disjuncts: Vec<QueryTreeNodePtr>) -> QueryTreeNodePtr {
    QueryTreeNode::new_function(builtin::OR, disjuncts)
}

/// `SELECT <column> FROM <table> WHERE <predicate>`
pub fn select_where(
    table_node: &QueryTreeNodePtr,
    column: &QueryTreeNodePtr,
    predicate: QueryTreeNodePtr,
) -> QueryTreeNodePtr {
    QueryNodeBuilder::new()
        .projection(vec![column.clone()])
        .join_tree(table_node.clone())
        .where_clause(predicate)
        .build()
}
