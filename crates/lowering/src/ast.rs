// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Legacy surface-syntax schema
//!
//! The pre-analysis syntax node shapes that compatibility paths still
//! consume. Lowering reconstructs these from the analyzed query tree; this
//! layer never parses them back.
//!
//! A lowered query is always a [`SelectQuery`] wrapped in a
//! [`SelectWithUnion`] container (union mode none), additionally wrapped
//! in a [`Subquery`] carrying the CTE name when the query node is a
//! subquery.

use serde::Serialize;

use sql_analyzer_ir::Value;

/// Legacy syntax node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ast {
    SelectQuery(SelectQuery),
    SelectWithUnion(SelectWithUnion),
    Subquery(Subquery),
    ExpressionList(Vec<Ast>),
    Identifier(String),
    Literal(Value),
    Function { name: String, arguments: Vec<Ast> },
    TableExpression { table_name: String },
}

/// SELECT statement with named clause slots
///
/// Exactly the clauses present on the query node are populated; an absent
/// clause stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectQuery {
    pub distinct: bool,
    pub with: Option<Box<Ast>>,
    pub select: Box<Ast>,
    pub tables: Option<Box<Ast>>,
    pub prewhere: Option<Box<Ast>>,
    pub where_clause: Option<Box<Ast>>,
    pub group_by: Option<Box<Ast>>,
    pub order_by: Option<Box<Ast>>,
    pub limit_length: Option<Box<Ast>>,
    pub limit_offset: Option<Box<Ast>>,
}

/// Union container around one or more SELECT statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectWithUnion {
    pub union_mode: UnionMode,
    pub selects: Vec<Ast>,
}

/// Union mode of a [`SelectWithUnion`]
///
/// Lowering only ever produces [`UnionMode::None`]; the other modes exist
/// in the legacy schema for parser-built trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum UnionMode {
    #[default]
    None,
    All,
    Distinct,
}

/// Subquery wrapper, optionally naming a CTE
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subquery {
    pub cte_name: Option<String>,
    pub query: Box<Ast>,
}
