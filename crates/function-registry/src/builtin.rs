// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin function table
//!
//! Overload descriptors for the functions the analysis layer works with.
//! Result types here are the fixed advertised types of the overloads;
//! argument-dependent typing is the concern of the full resolver service,
//! which this layer only consumes.

use sql_analyzer_ir::{DataType, ResolvedFunction};

pub const OR: &str = "or";
pub const AND: &str = "and";
pub const NOT: &str = "not";
pub const EQUALS: &str = "equals";
pub const LIKE: &str = "like";
pub const ILIKE: &str = "ilike";
pub const MULTI_MATCH_ANY: &str = "multiMatchAny";
pub const LOWER: &str = "lower";
pub const UPPER: &str = "upper";
pub const CONCAT: &str = "concat";

/// All builtin functions with their result types.
pub fn all_functions() -> Vec<(ResolvedFunction, DataType)> {
    vec![
        (ResolvedFunction::new(OR, 2, true), DataType::Boolean),
        (ResolvedFunction::new(AND, 2, true), DataType::Boolean),
        (ResolvedFunction::new(NOT, 1, false), DataType::Boolean),
        (ResolvedFunction::new(EQUALS, 2, false), DataType::Boolean),
        (ResolvedFunction::new(LIKE, 2, false), DataType::Boolean),
        (ResolvedFunction::new(ILIKE, 2, false), DataType::Boolean),
        (
            ResolvedFunction::new(MULTI_MATCH_ANY, 2, true),
            DataType::Boolean,
        ),
        (ResolvedFunction::new(LOWER, 1, false), DataType::String),
        (ResolvedFunction::new(UPPER, 1, false), DataType::String),
        (ResolvedFunction::new(CONCAT, 2, true), DataType::String),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_unique() {
        let functions = all_functions();
        let mut names: Vec<_> = functions
            .iter()
            .map(|(function, _)| function.name.to_ascii_lowercase())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), functions.len());
    }
}
