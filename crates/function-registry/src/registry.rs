// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Function resolver trait and the builtin registry implementation

use std::collections::HashMap;
use std::rc::Rc;

use sql_analyzer_context::ExecutionContext;
use sql_analyzer_ir::{DataType, ResolvedFunction};

use crate::builtin;
use crate::error::{ResolverError, ResolverResult};

/// Resolves a function name to an overload and its result type.
///
/// Rewrite passes obtain overloads through this interface before
/// constructing synthesized function nodes, so the analysis layer never
/// hardcodes overload knowledge.
pub trait FunctionResolver {
    fn resolve(
        &self,
        name: &str,
        context: &ExecutionContext,
    ) -> ResolverResult<(Rc<ResolvedFunction>, DataType)>;
}

/// Builtin function registry
///
/// Stores one overload descriptor per builtin function. Lookup is
/// case-insensitive on the function name.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, (Rc<ResolvedFunction>, DataType)>,
}

impl FunctionRegistry {
    /// Create a registry with all builtin functions loaded.
    pub fn new() -> Self {
        let mut functions = HashMap::new();
        for (function, result_type) in builtin::all_functions() {
            functions.insert(
                function.name.to_ascii_lowercase(),
                (Rc::new(function), result_type),
            );
        }
        Self { functions }
    }

    /// Lookup a single function by name.
    ///
    /// Returns `None` if no builtin is registered under the name.
    pub fn get_function(&self, name: &str) -> Option<&(Rc<ResolvedFunction>, DataType)> {
        self.functions.get(&name.to_ascii_lowercase())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionResolver for FunctionRegistry {
    fn resolve(
        &self,
        name: &str,
        _context: &ExecutionContext,
    ) -> ResolverResult<(Rc<ResolvedFunction>, DataType)> {
        self.get_function(name)
            .cloned()
            .ok_or_else(|| ResolverError::UnknownFunction(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::MULTI_MATCH_ANY;

    #[test]
    fn test_resolve_multi_match_any() {
        let registry = FunctionRegistry::new();
        let context = ExecutionContext::default();
        let (function, result_type) = registry.resolve(MULTI_MATCH_ANY, &context).unwrap();
        assert_eq!(function.name, MULTI_MATCH_ANY);
        assert!(function.variadic);
        assert_eq!(result_type, DataType::Boolean);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        let context = ExecutionContext::default();
        assert!(registry.resolve("MULTIMATCHANY", &context).is_ok());
        assert!(registry.resolve("Like", &context).is_ok());
    }

    #[test]
    fn test_resolve_unknown_function() {
        let registry = FunctionRegistry::new();
        let context = ExecutionContext::default();
        let err = registry.resolve("no_such_function", &context).unwrap_err();
        assert_eq!(
            err,
            ResolverError::UnknownFunction("no_such_function".to_string()),
        );
    }

    #[test]
    fn test_resolver_hands_out_shared_overloads() {
        let registry = FunctionRegistry::new();
        let context = ExecutionContext::default();
        let (first, _) = registry.resolve("or", &context).unwrap();
        let (second, _) = registry.resolve("or", &context).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }
}
