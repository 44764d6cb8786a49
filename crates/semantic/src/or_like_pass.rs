// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # OR-of-LIKE consolidation
//!
//! Merges `like`/`ilike` disjuncts of one OR that share a left-hand
//! expression into a single multi-pattern match call, so k separate
//! pattern evaluations against the same value become one combined
//! evaluation.
//!
//! A disjunct is a candidate when it is a `like`/`ilike` call with exactly
//! two arguments whose second argument is a string constant. Candidates
//! are grouped by the identity of their left-hand expression node, not by
//! structural equality: two structurally identical but distinct
//! expressions stay in separate groups. The left-hand node is reused as
//! the first argument of the synthesized call without cloning, so it ends
//! up aliased into every parent that referenced it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use sql_analyzer_context::ExecutionContext;
use sql_analyzer_function_registry::builtin;
use sql_analyzer_function_registry::{like_pattern_to_regexp, FunctionResolver};
use sql_analyzer_ir::{
    function_arguments, DataType, NodeId, QueryTreeNode, QueryTreeNodePtr, ResolvedFunction, Value,
};

use crate::error::SemanticResult;
use crate::visitor::QueryTreePass;

/// Rewrites `or(like(x, p1), like(x, p2), rest...)` into
/// `or(multiMatchAny(x, [r1, r2]), rest...)`.
pub struct OrLikeConsolidationPass {
    match_function: Rc<ResolvedFunction>,
    match_result_type: DataType,
}

impl OrLikeConsolidationPass {
    /// Resolve the multi-pattern match overload up front; every synthesized
    /// node binds to this one resolution.
    pub fn new(
        resolver: &dyn FunctionResolver,
        context: &ExecutionContext,
    ) -> SemanticResult<Self> {
        let (match_function, match_result_type) =
            resolver.resolve(builtin::MULTI_MATCH_ANY, context)?;
        Ok(Self {
            match_function,
            match_result_type,
        })
    }
}

/// One `like`/`ilike` disjunct eligible for consolidation
struct LikeCandidate {
    target: QueryTreeNodePtr,
    pattern: String,
    case_insensitive: bool,
}

fn like_candidate(node: &QueryTreeNodePtr) -> Option<LikeCandidate> {
    let borrowed = node.borrow();
    let function = borrowed.as_function()?;
    let case_insensitive = match function.function_name.as_str() {
        builtin::LIKE => false,
        builtin::ILIKE => true,
        _ => return None,
    };

    let arguments = function_arguments(node)?.borrow().list_nodes();
    if arguments.len() != 2 {
        return None;
    }

    let pattern_node = arguments[1].borrow();
    let constant = pattern_node.as_constant()?;
    if !constant.result_type.is_string() {
        return None;
    }
    let pattern = constant.value.as_str()?.to_string();

    Some(LikeCandidate {
        target: arguments[0].clone(),
        pattern,
        case_insensitive,
    })
}

impl QueryTreePass for OrLikeConsolidationPass {
    fn name(&self) -> &'static str {
        "OrLikeConsolidation"
    }

    fn visit(&mut self, node: &QueryTreeNodePtr) -> SemanticResult<()> {
        {
            let borrowed = node.borrow();
            match borrowed.as_function() {
                Some(function) if function.function_name == builtin::OR => {}
                _ => return Ok(()),
            }
        }
        let Some(arguments_list) = function_arguments(node) else {
            return Ok(());
        };
        let arguments = arguments_list.borrow().list_nodes();

        let mut unique_elems: Vec<QueryTreeNodePtr> = Vec::new();
        let mut group_of: HashMap<NodeId, usize> = HashMap::new();
        let mut groups: Vec<(QueryTreeNodePtr, Vec<Value>)> = Vec::new();
        let mut consolidated = 0usize;

        for argument in &arguments {
            let Some(candidate) = like_candidate(argument) else {
                unique_elems.push(argument.clone());
                continue;
            };

            let mut regexp = like_pattern_to_regexp(&candidate.pattern)?;
            if candidate.case_insensitive {
                // Case-insensitive mode marker, correct over multi-byte text.
                regexp.insert_str(0, "(?i)");
            }
            consolidated += 1;

            match group_of.entry(NodeId::of(&candidate.target)) {
                Entry::Occupied(slot) => groups[*slot.get()].1.push(Value::String(regexp)),
                Entry::Vacant(slot) => {
                    // The pattern array is appended once all patterns of the
                    // group are known.
                    let match_node = QueryTreeNode::new_function(
                        builtin::MULTI_MATCH_ANY,
                        vec![candidate.target.clone()],
                    );
                    if let Some(function) = match_node.borrow_mut().as_function_mut() {
                        function
                            .resolve(self.match_function.clone(), self.match_result_type.clone());
                    }
                    unique_elems.push(match_node.clone());
                    slot.insert(groups.len());
                    groups.push((match_node, vec![Value::String(regexp)]));
                }
            }
        }

        // No candidates: the argument list stays untouched, identities included.
        if consolidated == 0 {
            return Ok(());
        }

        for (match_node, patterns) in groups {
            if let Some(match_arguments) = function_arguments(&match_node) {
                let mut nodes = match_arguments.borrow().list_nodes();
                nodes.push(QueryTreeNode::new_constant(Value::Array(patterns)));
                match_arguments.borrow_mut().set_list_nodes(nodes);
            }
        }

        // OR must keep at least two arguments.
        if unique_elems.len() == 1 {
            unique_elems.push(QueryTreeNode::new_constant(Value::Boolean(false)));
        }

        tracing::debug!(
            disjuncts = arguments.len(),
            consolidated,
            "consolidated LIKE chain inside OR",
        );
        arguments_list.borrow_mut().set_list_nodes(unique_elems);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::visit_depth_first;
    use sql_analyzer_function_registry::FunctionRegistry;
    use sql_analyzer_ir::{semantic_name, NodeKind};

    fn pass() -> OrLikeConsolidationPass {
        let registry = FunctionRegistry::new();
        let context = ExecutionContext::default();
        OrLikeConsolidationPass::new(&registry, &context).unwrap()
    }

    fn like(target: &QueryTreeNodePtr, pattern: &str) -> QueryTreeNodePtr {
        QueryTreeNode::new_function(
            builtin::LIKE,
            vec![
                target.clone(),
                QueryTreeNode::new_constant(Value::from(pattern)),
            ],
        )
    }

    fn or_arguments(or_node: &QueryTreeNodePtr) -> Vec<QueryTreeNodePtr> {
        function_arguments(or_node).unwrap().borrow().list_nodes()
    }

    #[test]
    fn test_single_like_becomes_match_plus_false() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let or_node = QueryTreeNode::new_function(builtin::OR, vec![like(&column, "a%")]);

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        assert_eq!(rewritten.len(), 2);
        assert_eq!(
            semantic_name(&rewritten[0]),
            "multiMatchAny(c, ['^a.*'])",
        );
        assert_eq!(
            rewritten[1].borrow().as_constant().unwrap().value,
            Value::Boolean(false),
        );
    }

    #[test]
    fn test_non_candidates_keep_identity_and_order() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let other = QueryTreeNode::new_column("d", DataType::Boolean, &table);
        // Dynamic pattern: second argument is not a constant.
        let dynamic = QueryTreeNode::new_function(
            builtin::LIKE,
            vec![column.clone(), column.clone()],
        );
        let or_node =
            QueryTreeNode::new_function(builtin::OR, vec![other.clone(), dynamic.clone()]);

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        assert_eq!(rewritten.len(), 2);
        assert_eq!(NodeId::of(&rewritten[0]), NodeId::of(&other));
        assert_eq!(NodeId::of(&rewritten[1]), NodeId::of(&dynamic));
    }

    #[test]
    fn test_shared_target_groups_by_identity() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let other = QueryTreeNode::new_column("d", DataType::UInt64, &table);
        let eq_node = QueryTreeNode::new_function(
            builtin::EQUALS,
            vec![other, QueryTreeNode::new_constant(Value::UInt64(1))],
        );
        let or_node = QueryTreeNode::new_function(
            builtin::OR,
            vec![like(&column, "a%"), like(&column, "%b"), eq_node.clone()],
        );

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        assert_eq!(rewritten.len(), 2);
        assert_eq!(
            semantic_name(&rewritten[0]),
            "multiMatchAny(c, ['^a.*', '.*b$'])",
        );
        assert_eq!(NodeId::of(&rewritten[1]), NodeId::of(&eq_node));

        // The match call aliases the original column node, not a clone.
        let match_arguments = function_arguments(&rewritten[0]).unwrap();
        let targets = match_arguments.borrow().list_nodes();
        assert_eq!(NodeId::of(&targets[0]), NodeId::of(&column));
    }

    #[test]
    fn test_structurally_equal_targets_stay_separate() {
        let table = QueryTreeNode::new_table("t");
        let first = QueryTreeNode::new_column("c", DataType::String, &table);
        let second = QueryTreeNode::new_column("c", DataType::String, &table);
        let or_node = QueryTreeNode::new_function(
            builtin::OR,
            vec![like(&first, "a%"), like(&second, "a%")],
        );

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        assert_eq!(rewritten.len(), 2);
        for node in &rewritten {
            assert_eq!(
                node.borrow().as_function().unwrap().function_name,
                builtin::MULTI_MATCH_ANY,
            );
        }
    }

    #[test]
    fn test_ilike_gets_case_insensitive_marker() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let ilike_node = QueryTreeNode::new_function(
            builtin::ILIKE,
            vec![
                column.clone(),
                QueryTreeNode::new_constant(Value::from("%İstanbul%")),
            ],
        );
        let or_node = QueryTreeNode::new_function(builtin::OR, vec![ilike_node]);

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        assert_eq!(
            semantic_name(&rewritten[0]),
            "multiMatchAny(c, ['(?i).*İstanbul.*'])",
        );
    }

    #[test]
    fn test_no_candidates_leaves_or_untouched() {
        let table = QueryTreeNode::new_table("t");
        let a = QueryTreeNode::new_column("a", DataType::Boolean, &table);
        let b = QueryTreeNode::new_column("b", DataType::Boolean, &table);
        let or_node = QueryTreeNode::new_function(builtin::OR, vec![a.clone(), b.clone()]);
        let arguments_before = function_arguments(&or_node).unwrap();

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let arguments_after = function_arguments(&or_node).unwrap();
        assert_eq!(NodeId::of(&arguments_before), NodeId::of(&arguments_after));
        let rewritten = arguments_after.borrow().list_nodes();
        assert_eq!(NodeId::of(&rewritten[0]), NodeId::of(&a));
        assert_eq!(NodeId::of(&rewritten[1]), NodeId::of(&b));
    }

    #[test]
    fn test_synthesized_match_node_is_resolved() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let or_node = QueryTreeNode::new_function(builtin::OR, vec![like(&column, "a%")]);

        visit_depth_first(&or_node, &mut pass()).unwrap();

        let rewritten = or_arguments(&or_node);
        let match_node = rewritten[0].borrow();
        let function = match_node.as_function().unwrap();
        assert!(function.is_resolved());
        assert_eq!(function.result_type(), Some(&DataType::Boolean));
        assert_eq!(match_node.kind(), NodeKind::Function);
    }

    #[test]
    fn test_or_node_identity_is_preserved() {
        let table = QueryTreeNode::new_table("t");
        let column = QueryTreeNode::new_column("c", DataType::String, &table);
        let or_node = QueryTreeNode::new_function(builtin::OR, vec![like(&column, "a%")]);
        let id_before = NodeId::of(&or_node);

        visit_depth_first(&or_node, &mut pass()).unwrap();
        assert_eq!(NodeId::of(&or_node), id_before);
    }
}
