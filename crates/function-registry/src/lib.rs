// Copyright (c) 2025 sql-analyzer contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-analyzer - Function Registry
//!
//! This crate provides the function-resolution interface consumed by the
//! rewrite passes, a builtin registry implementation, and the LIKE-pattern
//! to regular-expression translator.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sql_analyzer_function_registry::{FunctionRegistry, FunctionResolver};
//!
//! let registry = FunctionRegistry::new();
//! let (overload, result_type) = registry.resolve("multiMatchAny", &context)?;
//! ```

pub mod builtin;
pub mod error;
pub mod like_pattern;
pub mod registry;

// Re-exports from ir for convenience
pub use sql_analyzer_ir::{DataType, ResolvedFunction};

pub use error::{LikePatternError, LikePatternResult, ResolverError, ResolverResult};
pub use like_pattern::like_pattern_to_regexp;
pub use registry::{FunctionRegistry, FunctionResolver};
