// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Indented diagnostic dump of a query tree
//!
//! Every node is annotated with a stable id drawn from a per-dump counter,
//! so a node aliased into several parents prints the same id at each
//! occurrence and shared subtrees are identifiable in the output.

use std::collections::HashMap;
use std::fmt::Write;

use crate::node::{
    function_children, query_children, NodeId, NodePayload, QueryTreeNodePtr,
};

/// Per-dump id assignment
#[derive(Default)]
struct FormatState {
    ids: HashMap<NodeId, usize>,
}

impl FormatState {
    fn node_id(&mut self, node: &QueryTreeNodePtr) -> usize {
        let next = self.ids.len();
        *self.ids.entry(NodeId::of(node)).or_insert(next)
    }
}

/// Render the tree as indented diagnostic text.
pub fn dump_tree(node: &QueryTreeNodePtr) -> String {
    let mut state = FormatState::default();
    let mut out = String::new();
    dump_node(node, &mut state, &mut out, 0);
    out
}

enum Descend {
    None,
    QuerySections,
    Arguments(QueryTreeNodePtr),
    ListNodes(Vec<QueryTreeNodePtr>),
}

fn dump_node(node: &QueryTreeNodePtr, state: &mut FormatState, out: &mut String, indent: usize) {
    let id = state.node_id(node);
    let pad = " ".repeat(indent);

    let descend = {
        let borrowed = node.borrow();

        let _ = write!(out, "{}{} id: {}", pad, borrowed.kind(), id);
        if let Some(alias) = borrowed.alias() {
            let _ = write!(out, ", alias: {}", alias);
        }

        match borrowed.payload() {
            NodePayload::Query(query) => {
                let _ = write!(
                    out,
                    ", is_subquery: {}, is_cte: {}, is_distinct: {}, is_limit_with_ties: {}",
                    query.is_subquery, query.is_cte, query.is_distinct, query.is_limit_with_ties,
                );
                if let Some(cte_name) = &query.cte_name {
                    let _ = write!(out, ", cte_name: {}", cte_name);
                }
                Descend::QuerySections
            }
            NodePayload::Function(function) => {
                let _ = write!(out, ", function_name: {}", function.function_name);
                if let Some(result_type) = function.result_type() {
                    let _ = write!(out, ", result_type: {}", result_type);
                }
                match borrowed.child(function_children::ARGUMENTS) {
                    Some(arguments) => Descend::Arguments(arguments),
                    None => Descend::None,
                }
            }
            NodePayload::Constant(constant) => {
                let _ = write!(
                    out,
                    ", constant_value: {}, constant_value_type: {}",
                    constant.value, constant.result_type,
                );
                Descend::None
            }
            NodePayload::List => {
                let children = borrowed.list_nodes();
                let _ = write!(out, ", nodes: {}", children.len());
                Descend::ListNodes(children)
            }
            NodePayload::Column(column) => {
                let _ = write!(
                    out,
                    ", column_name: {}, result_type: {}",
                    column.column_name, column.result_type,
                );
                if let Some(source) = column.source() {
                    let _ = write!(out, ", source_id: {}", state.node_id(&source));
                }
                Descend::None
            }
            NodePayload::Table(table) => {
                let _ = write!(out, ", table_name: {}", table.table_name);
                Descend::None
            }
        }
    };

    match descend {
        Descend::None => {}
        Descend::QuerySections => dump_query_sections(node, state, out, indent),
        Descend::Arguments(arguments) => {
            dump_section(&arguments, state, out, indent, "ARGUMENTS");
        }
        Descend::ListNodes(children) => {
            for child in children {
                out.push('\n');
                dump_node(&child, state, out, indent + 2);
            }
        }
    }
}

fn dump_query_sections(
    node: &QueryTreeNodePtr,
    state: &mut FormatState,
    out: &mut String,
    indent: usize,
) {
    let sections = [
        (query_children::WITH, "WITH", true),
        (query_children::PROJECTION, "PROJECTION", false),
        (query_children::JOIN_TREE, "JOIN TREE", false),
        (query_children::PREWHERE, "PREWHERE", false),
        (query_children::WHERE, "WHERE", false),
        (query_children::GROUP_BY, "GROUP BY", true),
        (query_children::ORDER_BY, "ORDER BY", true),
        (query_children::LIMIT, "LIMIT", false),
        (query_children::OFFSET, "OFFSET", false),
    ];

    for (slot, header, skip_if_empty) in sections {
        let Some(child) = node.borrow().child(slot) else {
            continue;
        };
        if skip_if_empty && child.borrow().list_nodes().is_empty() {
            continue;
        }
        dump_section(&child, state, out, indent, header);
    }
}

fn dump_section(
    child: &QueryTreeNodePtr,
    state: &mut FormatState,
    out: &mut String,
    indent: usize,
    header: &str,
) {
    let pad = " ".repeat(indent + 2);
    let _ = write!(out, "\n{}{}\n", pad, header);
    dump_node(child, state, out, indent + 4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{QueryNodeBuilder, QueryTreeNode};
    use crate::value::{DataType, Value};

    #[test]
    fn test_dump_contains_kinds_and_attributes() {
        let table = QueryTreeNode::new_table("users");
        let column = QueryTreeNode::new_column("name", DataType::String, &table);
        let pattern = QueryTreeNode::new_constant(Value::from("a%"));
        let predicate = QueryTreeNode::new_function("like", vec![column.clone(), pattern]);
        let query = QueryNodeBuilder::new()
            .projection(vec![column])
            .join_tree(table)
            .where_clause(predicate)
            .build();

        let dump = dump_tree(&query);
        assert!(dump.starts_with("QUERY id: 0"));
        assert!(dump.contains("PROJECTION"));
        assert!(dump.contains("JOIN TREE"));
        assert!(dump.contains("WHERE"));
        assert!(dump.contains("function_name: like"));
        assert!(dump.contains("constant_value: 'a%', constant_value_type: String"));
        assert!(dump.contains("table_name: users"));
        // Empty GROUP BY and ORDER BY sections are omitted.
        assert!(!dump.contains("GROUP BY"));
        assert!(!dump.contains("ORDER BY"));
    }

    #[test]
    fn test_dump_shared_node_gets_one_id() {
        let table = QueryTreeNode::new_table("t");
        let shared = QueryTreeNode::new_column("c", DataType::String, &table);
        let or_node = QueryTreeNode::new_function(
            "or",
            vec![
                QueryTreeNode::new_function("lower", vec![shared.clone()]),
                QueryTreeNode::new_function("upper", vec![shared.clone()]),
            ],
        );

        let dump = dump_tree(&or_node);
        let occurrences = dump.matches("column_name: c").count();
        assert_eq!(occurrences, 2);

        // Both occurrences carry the same id.
        let ids: Vec<&str> = dump
            .lines()
            .filter(|line| line.contains("column_name: c"))
            .map(|line| line.trim_start())
            .collect();
        assert_eq!(ids[0], ids[1]);
    }
}
