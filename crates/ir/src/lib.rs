// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Query Tree Intermediate Representation
//!
//! This crate provides the typed query tree that the semantic-analysis
//! layer operates on. The tree is:
//! - built once from the parsed syntax tree,
//! - mutated in place by rewrite passes (children-list replacement only),
//! - consumed by planning or lowered back to the legacy surface syntax.
//!
//! Node variants: query, function, constant, list, column reference and
//! table expression. Generic operations (equality, 128-bit structural
//! hashing, deep cloning, semantic naming, diagnostic dumping) are defined
//! once by tree walkers and shared by every variant.

pub mod dump;
pub mod error;
pub mod metadata;
pub mod node;
pub mod tree;
pub mod value;

// Re-export commonly used types
pub use dump::dump_tree;
pub use error::{IrError, IrResult};
pub use metadata::{NameAndType, ResolvedFunction};
pub use node::{
    function_arguments, function_children, query_children, ColumnPayload, ConstantPayload,
    FunctionPayload, FunctionResolution, NodeId, NodeKind, NodePayload, QueryNodeBuilder,
    QueryPayload, QueryTreeNode, QueryTreeNodePtr, QueryTreeNodeWeakPtr, TablePayload,
};
pub use tree::{
    clone_tree, projection_columns, semantic_name, tree_equal, tree_hash, TreeHash,
};
pub use value::{DataType, Value};
