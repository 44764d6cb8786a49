// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Query tree to legacy surface-syntax lowering
//!
//! Reconstructs an equivalent pre-analysis syntax tree from an analyzed
//! query tree. The lowering is a plain recursive walk; node aliasing in
//! the query tree flattens into duplicated syntax, which is what the
//! legacy consumers expect.

use sql_analyzer_ir::{
    function_children, query_children, NodePayload, QueryPayload, QueryTreeNode, QueryTreeNodePtr,
};

use crate::ast::{Ast, SelectQuery, SelectWithUnion, Subquery, UnionMode};
use crate::error::{LoweringError, LoweringResult};

/// Lower one query tree node to its legacy syntax form.
pub fn lower_to_ast(node: &QueryTreeNodePtr) -> LoweringResult<Ast> {
    let borrowed = node.borrow();
    match borrowed.payload() {
        NodePayload::Query(payload) => lower_query(&borrowed, payload),
        NodePayload::Function(function) => {
            let arguments = borrowed.child(function_children::ARGUMENTS).ok_or_else(|| {
                LoweringError::MissingChild {
                    context: format!("function '{}'", function.function_name),
                    expected: "arguments".to_string(),
                }
            })?;
            Ok(Ast::Function {
                name: function.function_name.clone(),
                arguments: lower_list_items(&arguments)?,
            })
        }
        NodePayload::Constant(constant) => Ok(Ast::Literal(constant.value.clone())),
        NodePayload::List => Ok(Ast::ExpressionList(lower_list_items_node(&borrowed)?)),
        NodePayload::Column(column) => Ok(Ast::Identifier(column.column_name.clone())),
        NodePayload::Table(table) => Ok(Ast::TableExpression {
            table_name: table.table_name.clone(),
        }),
    }
}

fn lower_list_items(list: &QueryTreeNodePtr) -> LoweringResult<Vec<Ast>> {
    lower_list_items_node(&list.borrow())
}

fn lower_list_items_node(list: &QueryTreeNode) -> LoweringResult<Vec<Ast>> {
    list.children()
        .iter()
        .flatten()
        .map(lower_to_ast)
        .collect()
}

fn lower_query(node: &QueryTreeNode, payload: &QueryPayload) -> LoweringResult<Ast> {
    let projection =
        node.child(query_children::PROJECTION)
            .ok_or_else(|| LoweringError::MissingChild {
                context: "query".to_string(),
                expected: "projection".to_string(),
            })?;

    let select_query = SelectQuery {
        distinct: payload.is_distinct,
        with: lower_clause_list(node, query_children::WITH)?,
        select: Box::new(lower_to_ast(&projection)?),
        tables: lower_clause(node, query_children::JOIN_TREE)?,
        prewhere: lower_clause(node, query_children::PREWHERE)?,
        where_clause: lower_clause(node, query_children::WHERE)?,
        group_by: lower_clause_list(node, query_children::GROUP_BY)?,
        order_by: lower_clause_list(node, query_children::ORDER_BY)?,
        limit_length: lower_clause(node, query_children::LIMIT)?,
        limit_offset: lower_clause(node, query_children::OFFSET)?,
    };

    // The union wrapper is unconditional, even around a single SELECT.
    let with_union = Ast::SelectWithUnion(SelectWithUnion {
        union_mode: UnionMode::None,
        selects: vec![Ast::SelectQuery(select_query)],
    });

    if payload.is_subquery {
        return Ok(Ast::Subquery(Subquery {
            cte_name: payload.cte_name.clone(),
            query: Box::new(with_union),
        }));
    }
    Ok(with_union)
}

fn lower_clause(node: &QueryTreeNode, slot: usize) -> LoweringResult<Option<Box<Ast>>> {
    match node.child(slot) {
        Some(child) => Ok(Some(Box::new(lower_to_ast(&child)?))),
        None => Ok(None),
    }
}

/// List-valued clause slots contribute nothing when empty.
fn lower_clause_list(node: &QueryTreeNode, slot: usize) -> LoweringResult<Option<Box<Ast>>> {
    match node.child(slot) {
        Some(child) if !child.borrow().list_nodes().is_empty() => {
            Ok(Some(Box::new(lower_to_ast(&child)?)))
        }
        _ => Ok(None),
    }
}
