// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Pass pipeline
//!
//! Passes run sequentially in registration order; each pass traverses the
//! whole tree to completion before the next one starts.

use sql_analyzer_context::ExecutionContext;
use sql_analyzer_function_registry::FunctionResolver;
use sql_analyzer_ir::QueryTreeNodePtr;

use crate::error::SemanticResult;
use crate::or_like_pass::OrLikeConsolidationPass;
use crate::visitor::{visit_depth_first, QueryTreePass};

/// Ordered collection of rewrite passes
#[derive(Default)]
pub struct QueryTreePassManager {
    passes: Vec<Box<dyn QueryTreePass>>,
}

impl QueryTreePassManager {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn add_pass(&mut self, pass: Box<dyn QueryTreePass>) {
        self.passes.push(pass);
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run every pass over the tree, in registration order.
    pub fn run(&mut self, root: &QueryTreeNodePtr) -> SemanticResult<()> {
        for pass in &mut self.passes {
            tracing::debug!(pass = pass.name(), "running query tree pass");
            visit_depth_first(root, pass.as_mut())?;
        }
        Ok(())
    }
}

/// The default rewrite pipeline for one query analysis.
///
/// Settings gate individual passes; the pipeline may be empty.
pub fn default_passes(
    resolver: &dyn FunctionResolver,
    context: &ExecutionContext,
) -> SemanticResult<QueryTreePassManager> {
    let mut manager = QueryTreePassManager::new();
    if context.settings().optimize_or_like_chain {
        manager.add_pass(Box::new(OrLikeConsolidationPass::new(resolver, context)?));
    }
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_analyzer_context::Settings;
    use sql_analyzer_function_registry::FunctionRegistry;
    use sql_analyzer_ir::{QueryTreeNode, Value};

    struct CountingPass {
        label: &'static str,
        log: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
    }

    impl QueryTreePass for CountingPass {
        fn name(&self) -> &'static str {
            self.label
        }

        fn visit(&mut self, _node: &QueryTreeNodePtr) -> SemanticResult<()> {
            self.log.borrow_mut().push(self.label);
            Ok(())
        }
    }

    #[test]
    fn test_passes_run_in_registration_order() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut manager = QueryTreePassManager::new();
        manager.add_pass(Box::new(CountingPass {
            label: "first",
            log: log.clone(),
        }));
        manager.add_pass(Box::new(CountingPass {
            label: "second",
            log: log.clone(),
        }));

        let node = QueryTreeNode::new_constant(Value::from(true));
        manager.run(&node).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_default_passes_respect_settings() {
        let registry = FunctionRegistry::new();

        let enabled = default_passes(&registry, &ExecutionContext::default()).unwrap();
        assert_eq!(enabled.pass_names(), vec!["OrLikeConsolidation"]);

        let disabled_settings = Settings {
            optimize_or_like_chain: false,
            ..Settings::default()
        };
        let disabled =
            default_passes(&registry, &ExecutionContext::new(disabled_settings)).unwrap();
        assert!(disabled.pass_names().is_empty());
    }
}
