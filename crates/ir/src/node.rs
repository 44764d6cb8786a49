// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query tree nodes
//!
//! The analyzed representation of a query is a tree of [`QueryTreeNode`]s
//! behind shared handles ([`QueryTreeNodePtr`]). Every node carries:
//!
//! - a payload with its kind-specific scalar attributes,
//! - an optional alias,
//! - an ordered list of owned child slots, with fixed arity per kind.
//!
//! ## Ownership and aliasing
//!
//! Ownership is tree-shaped: each child is owned by exactly one parent
//! slot. Rewrite passes may deliberately alias one node into several
//! parents; the shared handle keeps it alive for as long as the longest
//! holder, and a mutation through one handle is visible through every
//! alias. No node holds a back-reference to its parent.
//!
//! The column variant's source link is the one exception to tree shape:
//! it is a weak back-link to the table expression (or subquery) the column
//! resolves against, used as a lookup key rather than an ownership edge.
//!
//! ## Identity
//!
//! Maps over nodes key by [`NodeId`], the address of the node allocation.
//! Two structurally identical but distinct node instances are different
//! keys by design; they are never silently unified.
//!
//! ## Child slots
//!
//! Query nodes have nine fixed slots (see [`query_children`]). The
//! `with`, `projection`, `group_by` and `order_by` slots always hold a
//! list node, empty by default; the remaining slots may be absent.
//! Function nodes have a single `arguments` slot holding a list node.
//! Constant, column and table nodes have no children.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::metadata::ResolvedFunction;
use crate::value::{DataType, Value};

/// Shared handle to a query tree node
pub type QueryTreeNodePtr = Rc<RefCell<QueryTreeNode>>;

/// Weak handle used for non-owning back-links
pub type QueryTreeNodeWeakPtr = Weak<RefCell<QueryTreeNode>>;

/// Stable identity of a node allocation
///
/// Structurally equal but distinct nodes have distinct ids. An id is only
/// meaningful while some handle keeps the node alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(*const RefCell<QueryTreeNode>);

impl NodeId {
    pub fn of(node: &QueryTreeNodePtr) -> Self {
        NodeId(Rc::as_ptr(node))
    }
}

/// Node kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Query,
    Function,
    Constant,
    List,
    Column,
    Table,
}

impl NodeKind {
    /// Upper-case tag used in tree dumps and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Query => "QUERY",
            NodeKind::Function => "FUNCTION",
            NodeKind::Constant => "CONSTANT",
            NodeKind::List => "LIST",
            NodeKind::Column => "COLUMN",
            NodeKind::Table => "TABLE",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed child slot indices of a query node
pub mod query_children {
    pub const WITH: usize = 0;
    pub const PROJECTION: usize = 1;
    pub const JOIN_TREE: usize = 2;
    pub const PREWHERE: usize = 3;
    pub const WHERE: usize = 4;
    pub const GROUP_BY: usize = 5;
    pub const ORDER_BY: usize = 6;
    pub const LIMIT: usize = 7;
    pub const OFFSET: usize = 8;
    pub const COUNT: usize = 9;
}

/// Fixed child slot indices of a function node
pub mod function_children {
    pub const ARGUMENTS: usize = 0;
    pub const COUNT: usize = 1;
}

/// Scalar attributes of a query node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPayload {
    pub is_subquery: bool,
    pub is_cte: bool,
    pub is_distinct: bool,
    pub is_limit_with_ties: bool,
    pub cte_name: Option<String>,
}

/// Resolution state of a function node
///
/// Every function node must be resolved before the tree leaves analysis.
#[derive(Debug, Clone)]
pub enum FunctionResolution {
    Unresolved,
    Resolved {
        function: Rc<ResolvedFunction>,
        result_type: DataType,
    },
}

/// Scalar attributes of a function node
#[derive(Debug, Clone)]
pub struct FunctionPayload {
    pub function_name: String,
    pub resolution: FunctionResolution,
}

impl FunctionPayload {
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, FunctionResolution::Resolved { .. })
    }

    pub fn result_type(&self) -> Option<&DataType> {
        match &self.resolution {
            FunctionResolution::Resolved { result_type, .. } => Some(result_type),
            FunctionResolution::Unresolved => None,
        }
    }

    pub fn resolved_function(&self) -> Option<&Rc<ResolvedFunction>> {
        match &self.resolution {
            FunctionResolution::Resolved { function, .. } => Some(function),
            FunctionResolution::Unresolved => None,
        }
    }

    /// Bind this function to an externally resolved overload.
    pub fn resolve(&mut self, function: Rc<ResolvedFunction>, result_type: DataType) {
        self.resolution = FunctionResolution::Resolved {
            function,
            result_type,
        };
    }
}

/// Scalar attributes of a constant node
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPayload {
    pub value: Value,
    pub result_type: DataType,
}

/// Scalar attributes of a column node
#[derive(Debug, Clone)]
pub struct ColumnPayload {
    pub column_name: String,
    pub result_type: DataType,
    source: QueryTreeNodeWeakPtr,
}

impl ColumnPayload {
    /// The table expression or subquery this column resolves against.
    ///
    /// Returns `None` once the source node has been dropped.
    pub fn source(&self) -> Option<QueryTreeNodePtr> {
        self.source.upgrade()
    }

    pub fn set_source(&mut self, source: &QueryTreeNodePtr) {
        self.source = Rc::downgrade(source);
    }
}

/// Scalar attributes of a table node
#[derive(Debug, Clone, PartialEq)]
pub struct TablePayload {
    pub table_name: String,
}

/// Kind-specific payload of a node
#[derive(Debug, Clone)]
pub enum NodePayload {
    Query(QueryPayload),
    Function(FunctionPayload),
    Constant(ConstantPayload),
    List,
    Column(ColumnPayload),
    Table(TablePayload),
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Query(_) => NodeKind::Query,
            NodePayload::Function(_) => NodeKind::Function,
            NodePayload::Constant(_) => NodeKind::Constant,
            NodePayload::List => NodeKind::List,
            NodePayload::Column(_) => NodeKind::Column,
            NodePayload::Table(_) => NodeKind::Table,
        }
    }
}

/// A node of the analyzed query tree
#[derive(Debug)]
pub struct QueryTreeNode {
    payload: NodePayload,
    alias: Option<String>,
    children: Vec<Option<QueryTreeNodePtr>>,
}

impl QueryTreeNode {
    fn make(payload: NodePayload, children: Vec<Option<QueryTreeNodePtr>>) -> QueryTreeNodePtr {
        Rc::new(RefCell::new(QueryTreeNode {
            payload,
            alias: None,
            children,
        }))
    }

    /// Assemble a node from an existing payload, alias and children.
    ///
    /// The generic clone walker uses this: the payload carries the node's
    /// own scalar attributes, the walker supplies the cloned children.
    pub fn from_parts(
        payload: NodePayload,
        alias: Option<&str>,
        children: Vec<Option<QueryTreeNodePtr>>,
    ) -> QueryTreeNodePtr {
        Rc::new(RefCell::new(QueryTreeNode {
            payload,
            alias: alias.map(str::to_string),
            children,
        }))
    }

    /// Create an empty query node.
    ///
    /// The `with`, `projection`, `group_by` and `order_by` slots are
    /// initialized with empty list nodes; the remaining slots are absent.
    pub fn new_query() -> QueryTreeNodePtr {
        let mut children: Vec<Option<QueryTreeNodePtr>> = vec![None; query_children::COUNT];
        children[query_children::WITH] = Some(Self::new_list(Vec::new()));
        children[query_children::PROJECTION] = Some(Self::new_list(Vec::new()));
        children[query_children::GROUP_BY] = Some(Self::new_list(Vec::new()));
        children[query_children::ORDER_BY] = Some(Self::new_list(Vec::new()));
        Self::make(NodePayload::Query(QueryPayload::default()), children)
    }

    /// Create an unresolved function node with the given arguments.
    pub fn new_function(
        function_name: impl Into<String>,
        arguments: Vec<QueryTreeNodePtr>,
    ) -> QueryTreeNodePtr {
        Self::make(
            NodePayload::Function(FunctionPayload {
                function_name: function_name.into(),
                resolution: FunctionResolution::Unresolved,
            }),
            vec![Some(Self::new_list(arguments))],
        )
    }

    pub fn new_constant(value: Value) -> QueryTreeNodePtr {
        let result_type = value.data_type();
        Self::make(
            NodePayload::Constant(ConstantPayload { value, result_type }),
            Vec::new(),
        )
    }

    pub fn new_list(nodes: Vec<QueryTreeNodePtr>) -> QueryTreeNodePtr {
        Self::make(NodePayload::List, nodes.into_iter().map(Some).collect())
    }

    pub fn new_column(
        column_name: impl Into<String>,
        result_type: DataType,
        source: &QueryTreeNodePtr,
    ) -> QueryTreeNodePtr {
        Self::make(
            NodePayload::Column(ColumnPayload {
                column_name: column_name.into(),
                result_type,
                source: Rc::downgrade(source),
            }),
            Vec::new(),
        )
    }

    pub fn new_table(table_name: impl Into<String>) -> QueryTreeNodePtr {
        Self::make(
            NodePayload::Table(TablePayload {
                table_name: table_name.into(),
            }),
            Vec::new(),
        )
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut NodePayload {
        &mut self.payload
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }

    pub fn children(&self) -> &[Option<QueryTreeNodePtr>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<QueryTreeNodePtr> {
        self.children.get(index).and_then(Clone::clone)
    }

    pub fn set_child(&mut self, index: usize, child: Option<QueryTreeNodePtr>) {
        if index >= self.children.len() {
            self.children.resize(index + 1, None);
        }
        self.children[index] = child;
    }

    /// Present children of a list node, in order.
    pub fn list_nodes(&self) -> Vec<QueryTreeNodePtr> {
        self.children.iter().flatten().cloned().collect()
    }

    /// Replace the children collection of a list node wholesale.
    ///
    /// This is the mutation rewrite passes perform; the identity of the
    /// list node itself is preserved.
    pub fn set_list_nodes(&mut self, nodes: Vec<QueryTreeNodePtr>) {
        self.children = nodes.into_iter().map(Some).collect();
    }

    pub fn as_query(&self) -> Option<&QueryPayload> {
        match &self.payload {
            NodePayload::Query(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_query_mut(&mut self) -> Option<&mut QueryPayload> {
        match &mut self.payload {
            NodePayload::Query(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionPayload> {
        match &self.payload {
            NodePayload::Function(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionPayload> {
        match &mut self.payload {
            NodePayload::Function(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&ConstantPayload> {
        match &self.payload {
            NodePayload::Constant(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnPayload> {
        match &self.payload {
            NodePayload::Column(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_column_mut(&mut self) -> Option<&mut ColumnPayload> {
        match &mut self.payload {
            NodePayload::Column(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TablePayload> {
        match &self.payload {
            NodePayload::Table(payload) => Some(payload),
            _ => None,
        }
    }

    /// The result type of this node, where one is known.
    ///
    /// Unresolved functions, lists, queries and tables have no result type.
    pub fn result_type(&self) -> Option<DataType> {
        match &self.payload {
            NodePayload::Constant(payload) => Some(payload.result_type.clone()),
            NodePayload::Column(payload) => Some(payload.result_type.clone()),
            NodePayload::Function(payload) => payload.result_type().cloned(),
            _ => None,
        }
    }
}

/// The arguments list node of a function node.
pub fn function_arguments(node: &QueryTreeNodePtr) -> Option<QueryTreeNodePtr> {
    let borrowed = node.borrow();
    borrowed.as_function()?;
    borrowed.child(function_children::ARGUMENTS)
}

/// Builder for query nodes
///
/// ```rust,ignore
/// let query = QueryNodeBuilder::new()
///     .projection(vec![column])
///     .join_tree(table)
///     .where_clause(predicate)
///     .build();
/// ```
pub struct QueryNodeBuilder {
    node: QueryTreeNodePtr,
}

impl QueryNodeBuilder {
    pub fn new() -> Self {
        Self {
            node: QueryTreeNode::new_query(),
        }
    }

    pub fn with(self, nodes: Vec<QueryTreeNodePtr>) -> Self {
        self.set(query_children::WITH, Some(QueryTreeNode::new_list(nodes)))
    }

    pub fn projection(self, nodes: Vec<QueryTreeNodePtr>) -> Self {
        self.set(
            query_children::PROJECTION,
            Some(QueryTreeNode::new_list(nodes)),
        )
    }

    pub fn join_tree(self, node: QueryTreeNodePtr) -> Self {
        self.set(query_children::JOIN_TREE, Some(node))
    }

    pub fn prewhere(self, node: QueryTreeNodePtr) -> Self {
        self.set(query_children::PREWHERE, Some(node))
    }

    pub fn where_clause(self, node: QueryTreeNodePtr) -> Self {
        self.set(query_children::WHERE, Some(node))
    }

    pub fn group_by(self, nodes: Vec<QueryTreeNodePtr>) -> Self {
        self.set(
            query_children::GROUP_BY,
            Some(QueryTreeNode::new_list(nodes)),
        )
    }

    pub fn order_by(self, nodes: Vec<QueryTreeNodePtr>) -> Self {
        self.set(
            query_children::ORDER_BY,
            Some(QueryTreeNode::new_list(nodes)),
        )
    }

    pub fn limit(self, node: QueryTreeNodePtr) -> Self {
        self.set(query_children::LIMIT, Some(node))
    }

    pub fn offset(self, node: QueryTreeNodePtr) -> Self {
        self.set(query_children::OFFSET, Some(node))
    }

    pub fn distinct(self, is_distinct: bool) -> Self {
        if let Some(query) = self.node.borrow_mut().as_query_mut() {
            query.is_distinct = is_distinct;
        }
        self
    }

    pub fn subquery(self, is_subquery: bool) -> Self {
        if let Some(query) = self.node.borrow_mut().as_query_mut() {
            query.is_subquery = is_subquery;
        }
        self
    }

    pub fn cte(self, cte_name: impl Into<String>) -> Self {
        if let Some(query) = self.node.borrow_mut().as_query_mut() {
            query.is_cte = true;
            query.cte_name = Some(cte_name.into());
        }
        self
    }

    pub fn alias(self, alias: impl Into<String>) -> Self {
        self.node.borrow_mut().set_alias(Some(alias.into()));
        self
    }

    pub fn build(self) -> QueryTreeNodePtr {
        self.node
    }

    fn set(self, index: usize, child: Option<QueryTreeNodePtr>) -> Self {
        self.node.borrow_mut().set_child(index, child);
        self
    }
}

impl Default for QueryNodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
