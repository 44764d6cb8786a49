// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # In-place rewrite visitor
//!
//! Single-threaded, synchronous, pre-order traversal over mutable node
//! slots. The pass is invoked on a node first; it may replace that node's
//! children collection wholesale (it must never delete or mutate nodes it
//! does not own), and the traversal then descends into the current
//! children.
//!
//! Nodes synthesized by the pass during the traversal are not visited:
//! the driver records the identity of every node reachable from the root
//! before the pass runs and descends only into children that were part of
//! the original tree. A pass that wants to rewrite inside a subtree it
//! synthesizes must do so while constructing it. A node detached by a
//! rewrite is likewise not visited, even when it survives underneath a
//! synthesized parent.
//!
//! There are no suspension points; a pass runs start-to-finish on the
//! calling thread and either completes or aborts the whole analysis.

use std::collections::HashSet;

use sql_analyzer_ir::{NodeId, QueryTreeNodePtr};

use crate::error::SemanticResult;

/// A rewrite pass over the query tree
pub trait QueryTreePass {
    /// Pass name for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Visit one node. The pass may replace the children collections of
    /// nodes in the subtree it is visiting; the identity of the visited
    /// node itself is preserved.
    fn visit(&mut self, node: &QueryTreeNodePtr) -> SemanticResult<()>;
}

/// Run one pass over the whole tree, depth-first.
pub fn visit_depth_first(
    root: &QueryTreeNodePtr,
    pass: &mut dyn QueryTreePass,
) -> SemanticResult<()> {
    let mut original = HashSet::new();
    collect_node_ids(root, &mut original);
    visit_node(root, pass, &original)
}

fn collect_node_ids(node: &QueryTreeNodePtr, ids: &mut HashSet<NodeId>) {
    if !ids.insert(NodeId::of(node)) {
        return;
    }
    let children: Vec<_> = node.borrow().children().iter().flatten().cloned().collect();
    for child in children {
        collect_node_ids(&child, ids);
    }
}

fn visit_node(
    node: &QueryTreeNodePtr,
    pass: &mut dyn QueryTreePass,
    original: &HashSet<NodeId>,
) -> SemanticResult<()> {
    pass.visit(node)?;

    let children: Vec<_> = node.borrow().children().iter().flatten().cloned().collect();
    for child in children {
        if original.contains(&NodeId::of(&child)) {
            visit_node(&child, pass, original)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_analyzer_ir::{NodeKind, QueryTreeNode, Value};

    /// Records visited constants and replaces a marker node's children.
    struct RecordingPass {
        visited: Vec<String>,
    }

    impl QueryTreePass for RecordingPass {
        fn name(&self) -> &'static str {
            "Recording"
        }

        fn visit(&mut self, node: &QueryTreeNodePtr) -> SemanticResult<()> {
            let borrowed = node.borrow();
            if let Some(constant) = borrowed.as_constant() {
                self.visited.push(constant.value.to_string());
            }
            Ok(())
        }
    }

    /// Replaces the children of every list it visits with a synthesized
    /// constant plus the original children.
    struct SynthesizingPass {
        visited: Vec<String>,
    }

    impl QueryTreePass for SynthesizingPass {
        fn name(&self) -> &'static str {
            "Synthesizing"
        }

        fn visit(&mut self, node: &QueryTreeNodePtr) -> SemanticResult<()> {
            if let Some(constant) = node.borrow().as_constant() {
                self.visited.push(constant.value.to_string());
                return Ok(());
            }

            if node.borrow().kind() == NodeKind::List {
                let mut nodes = node.borrow().list_nodes();
                nodes.insert(0, QueryTreeNode::new_constant(Value::from("synthesized")));
                node.borrow_mut().set_list_nodes(nodes);
            }
            Ok(())
        }
    }

    #[test]
    fn test_pre_order_visits_every_original_node() {
        let list = QueryTreeNode::new_list(vec![
            QueryTreeNode::new_constant(Value::from("a")),
            QueryTreeNode::new_list(vec![QueryTreeNode::new_constant(Value::from("b"))]),
        ]);

        let mut pass = RecordingPass { visited: Vec::new() };
        visit_depth_first(&list, &mut pass).unwrap();
        assert_eq!(pass.visited, vec!["'a'", "'b'"]);
    }

    #[test]
    fn test_synthesized_children_are_not_revisited() {
        let list = QueryTreeNode::new_list(vec![
            QueryTreeNode::new_constant(Value::from("a")),
            QueryTreeNode::new_constant(Value::from("b")),
        ]);

        let mut pass = SynthesizingPass { visited: Vec::new() };
        visit_depth_first(&list, &mut pass).unwrap();

        // The synthesized constant is present in the tree afterwards ...
        let values: Vec<String> = list
            .borrow()
            .list_nodes()
            .iter()
            .map(|node| node.borrow().as_constant().unwrap().value.to_string())
            .collect();
        assert_eq!(values, vec!["'synthesized'", "'a'", "'b'"]);

        // ... but was never handed to the pass.
        assert_eq!(pass.visited, vec!["'a'", "'b'"]);
    }
}
